use crate::{
    grit::{insertion_sort, Run},
    merge::{
        merge_buffered, merge_fragment, merge_fragment_buffered, merge_lazy, MergeCursor, Origin,
    },
    scratch::Scratch,
    util::{block_swap, Less},
};

// Selection sort the `count` blocks of length `block_len` starting at `s` by their first element,
// breaking ties with the keys starting at `keys`. Keys are swapped alongside their blocks.
//
// Return the new index of the key that was at index `median`.
fn select_blocks<T, F: Less<T>>(
    v: &mut [T],
    keys: usize,
    s: usize,
    mut median: usize,
    count: usize,
    block_len: usize,
    less: &mut F,
) -> usize {
    let head = |i: usize| s + i * block_len;

    for block in 1..count {
        let left = block - 1;
        let mut min = left;

        for i in block..count {
            let is_less = less(&v[head(i)], &v[head(min)]);
            let is_tie = !is_less && !less(&v[head(min)], &v[head(i)]);

            if is_less || (is_tie && less(&v[keys + i], &v[keys + min])) {
                min = i;
            }
        }

        if min != left {
            block_swap(v, head(left), head(min), block_len);
            v.swap(keys + left, keys + min);

            if median == left {
                median = min;
            } else if median == min {
                median = left;
            }
        }
    }

    median
}

// Return the run that the block tagged by the key at `key` came from.
fn origin_of<T, F: Less<T>>(v: &[T], key: usize, median: usize, less: &mut F) -> Origin {
    if less(&v[key], &v[median]) {
        Origin::Left
    } else {
        Origin::Right
    }
}

// Merge the tagged blocks of length `block_len` covering `blocks`, which are sorted by their first
// element. A block came from the left run iff its key is less than the key at `median`.
//
// Return the cursor describing the unmerged fragment at the end of `blocks`.
fn merge_blocks<T, F: Less<T>>(
    v: &mut [T],
    keys: usize,
    median: usize,
    blocks: Run,
    block_len: usize,
    scratch: &mut Scratch<T>,
    less: &mut F,
) -> MergeCursor {
    let mut cursor = MergeCursor::new(block_len, origin_of(v, keys, keys + median, less));
    let mut end = blocks.start + block_len;

    for i in 1..blocks.len / block_len {
        let next = origin_of(v, keys + i, keys + median, less);
        let s = end - cursor.block_len;

        cursor = if next == cursor.origin {
            // The fragment is already in place in front of a block from the same run
            MergeCursor::new(block_len, next)
        } else if block_len <= scratch.capacity() {
            merge_fragment_buffered(v, s, cursor, block_len, scratch, less)
        } else {
            merge_fragment(v, s, cursor, block_len, less)
        };

        end += block_len;
    }

    cursor
}

// Merge `s..s + n1` with the partial block `s + n1..s + n1 + n2` that ends the right run.
fn merge_tail<T, F: Less<T>>(
    v: &mut [T],
    s: usize,
    n1: usize,
    n2: usize,
    scratch: &mut Scratch<T>,
    less: &mut F,
) {
    if n1 <= scratch.capacity() {
        merge_buffered(v, s, n1, n2, scratch, less);
    } else {
        merge_lazy(v, s, n1, n2, less);
    }
}

/// Merge the adjacent runs `left` and `right`, tagging blocks of length `block_len` with the
/// distinct keys starting at `keys`. Fragments go through `scratch` if a block fits in it, and are
/// rotated into place otherwise.
///
/// `left.len` must be a multiple of `block_len`, while `right` may end in a partial block. Takes
/// `(left.len + right.len) / block_len` keys, plus one if there is a partial block. The keys are
/// left in unspecified order.
pub fn keyed_block_merge<T, F: Less<T>>(
    v: &mut [T],
    keys: usize,
    left: Run,
    right: Run,
    block_len: usize,
    scratch: &mut Scratch<T>,
    less: &mut F,
) {
    debug_assert_eq!(left.end(), right.start);
    debug_assert_eq!(left.len % block_len, 0);

    let s = left.start;
    let mut count = (left.len + right.len) / block_len;
    let tail = (left.len + right.len) % block_len;

    // Left blocks take the smaller keys, the first right key is the median
    insertion_sort(v, keys, count + (tail > 0) as usize, less);
    let median = select_blocks(v, keys, s, left.len / block_len, count, block_len, less);

    // The last blocks sorting after the head of the tail all came from the left run
    let mut last = 0;

    if tail > 0 {
        let head = s + count * block_len;

        while last < count && less(&v[head], &v[s + (count - last - 1) * block_len]) {
            last += 1;
        }
    }

    count -= last;

    if count == 0 {
        return merge_tail(v, s, last * block_len, tail, scratch, less);
    }

    let blocks = Run {
        start: s,
        len: count * block_len,
    };
    let cursor = merge_blocks(v, keys, median, blocks, block_len, scratch, less);

    if tail > 0 {
        let n1 = last * block_len;

        match cursor.origin {
            Origin::Left => {
                let start = blocks.end() - cursor.block_len;
                merge_tail(v, start, cursor.block_len + n1, tail, scratch, less);
            }
            Origin::Right => merge_tail(v, blocks.end(), n1, tail, scratch, less),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;

    type Tagged = (u32, u32);

    fn by_key(a: &Tagged, b: &Tagged) -> bool {
        a.0 < b.0
    }

    #[test]
    fn blocks_sorted_by_head_then_key() {
        // Keys 0..4, then four blocks of two: heads 5, 1, 5, 3
        let mut v = vec![0, 1, 2, 3, 5, 6, 1, 2, 5, 7, 3, 4];
        let mut less = |a: &i32, b: &i32| a < b;
        let median = select_blocks(&mut v, 0, 4, 2, 4, 2, &mut less);

        assert_eq!(&v[4..], [1, 2, 3, 4, 5, 6, 5, 7]);
        assert_eq!(&v[..4], [1, 3, 0, 2]);
        assert_eq!(v[median], 2);
    }

    // Lay out `key_count` distinct keys followed by `left` and `right`, block merge the runs and
    // check the result against a stable sort. The keys must come back as a permutation.
    fn check_merge(key_count: usize, left: &[Tagged], right: &[Tagged], block_len: usize) {
        for scratch_len in [0, block_len] {
            let keys: Vec<Tagged> = (0..key_count as u32).map(|i| (1000 + i, 0)).collect();
            let mut v: Vec<Tagged> = keys.iter().chain(left).chain(right).copied().collect();

            let left_run = Run {
                start: key_count,
                len: left.len(),
            };
            let right_run = Run {
                start: left_run.end(),
                len: right.len(),
            };
            let mut scratch = Scratch::with_len(scratch_len);
            keyed_block_merge(
                &mut v,
                0,
                left_run,
                right_run,
                block_len,
                &mut scratch,
                &mut by_key,
            );

            let mut expected: Vec<Tagged> = left.iter().chain(right).copied().collect();
            expected.sort_by_key(|x| x.0);
            assert_eq!(&v[key_count..], expected, "scratch of {scratch_len}");

            let mut tags = v[..key_count].to_vec();
            tags.sort();
            assert_eq!(tags, keys);
        }
    }

    #[test]
    fn block_merge_is_stable() {
        let left = [(1, 1), (2, 2), (2, 3), (6, 4)];
        let right = [(2, 5), (3, 6), (6, 7), (7, 8)];
        check_merge(4, &left, &right, 2);
    }

    #[test]
    fn block_merge_with_partial_right_run() {
        let left = [(1, 1), (4, 2), (5, 3), (9, 4)];
        let right = [(2, 5), (4, 6), (6, 7)];
        check_merge(4, &left, &right, 2);
    }

    #[test]
    fn block_merge_right_run_shorter_than_block() {
        let left = [(3, 0), (5, 1), (7, 2), (8, 3)];
        let right = [(4, 4), (7, 5)];
        check_merge(2, &left, &right, 4);
    }

    #[test]
    fn left_blocks_all_after_tail() {
        let left = [(5, 0), (6, 1), (7, 2), (8, 3)];
        let right = [(4, 4)];
        check_merge(3, &left, &right, 2);
    }

    #[test]
    fn random_block_merges() {
        let mut rng = StdRng::seed_from_u64(7);

        for block_len in [2, 3, 4, 8] {
            for left_blocks in 1..6 {
                let left_len = left_blocks * block_len;

                for right_len in 1..=left_len {
                    let spread = rng.gen_range(1..20);
                    let mut run = |len: usize, tag: u32| -> Vec<Tagged> {
                        let mut r: Vec<Tagged> = (0..len as u32)
                            .map(|i| (rng.gen_range(0..spread), tag + i))
                            .collect();
                        r.sort_by_key(|x| x.0);
                        r
                    };

                    let left = run(left_len, 0);
                    let right = run(right_len, 100);
                    check_merge((left_len + right_len) / block_len + 1, &left, &right, block_len);
                }
            }
        }
    }
}
