use log::{debug, trace};

use crate::{
    blocks::keyed_block_merge,
    keys::collect_keys,
    merge::{merge_buffered, merge_lazy},
    pairs::pairwise_writes,
    scratch::Scratch,
    util::{rotate, Less},
};

/// Sort with plain insertion sort if the array is smaller than this.
pub const MIN_SORT: usize = 16;

/// A contiguous region of a slice known to be sorted
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Run {
    /// Index of the first element
    pub start: usize,

    /// Number of elements
    pub len: usize,
}

impl Run {
    /// Return the index one past the last element of this run.
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Return the desired block length to sort `n` elements.
pub fn block_length(n: usize) -> usize {
    let k = 1 << ((n.ilog2() + 1) / 2);
    k << (k < n / k) as usize
}

/// Sort `start..start + len` with insertion sort by adjacent swaps.
///
/// Equal elements never cross each other.
pub fn insertion_sort<T, F: Less<T>>(v: &mut [T], start: usize, len: usize, less: &mut F) {
    let v = &mut v[start..start + len];

    for i in 1..len {
        let mut right = i;

        while right > 0 && less(&v[right], &v[right - 1]) {
            v.swap(right - 1, right);
            right -= 1;
        }
    }
}

// Build sorted pairs on `keys..keys + len`, borrowing the last two keys as the vacated slots, and
// put the keys back in front afterwards. No pair is read again once written, so plain writes do.
fn build_pairs<T, F: Less<T>>(v: &mut [T], keys: usize, len: usize, less: &mut F) {
    pairwise_writes(v, keys, len, less);
    rotate(v, keys - 2, len, 2);
}

// Return the number of keys a block merge of `left` and `right` takes.
fn block_keys(left: Run, right: Run, block_len: usize) -> usize {
    let len = left.len + right.len;
    len / block_len + (len % block_len != 0) as usize
}

// Merge the adjacent runs `left` and `right` with the cheapest strategy available.
fn merge_runs<T, F: Less<T>>(
    v: &mut [T],
    left: Run,
    right: Run,
    keys: usize,
    block_len: usize,
    scratch: &mut Scratch<T>,
    less: &mut F,
) {
    debug_assert_eq!(left.end(), right.start);

    if right.len == 0 || !less(&v[right.start], &v[left.end() - 1]) {
        return;
    }

    if left.len <= scratch.capacity() {
        trace!("buffered merge of {left:?} and {right:?}");
        merge_buffered(v, left.start, left.len, right.len, scratch, less);
    } else if left.len >= block_len && block_keys(left, right, block_len) <= keys {
        trace!("block merge of {left:?} and {right:?}");
        keyed_block_merge(v, 0, left, right, block_len, scratch, less);
    } else {
        trace!("rotation merge of {left:?} and {right:?}");
        merge_lazy(v, left.start, left.len, right.len, less);
    }
}

/// Sort `v` with gritsort, using `scratch` to speed up short merges and block merges.
pub fn sort<T, F: Less<T>>(v: &mut [T], scratch: &mut Scratch<T>, less: &mut F) {
    let n = v.len();

    if n < MIN_SORT {
        return insertion_sort(v, 0, n, less);
    }

    let mut block_len = block_length(n);

    // Blocks that fit in scratch merge without rotations
    if block_len > scratch.capacity() && block_len / 2 <= scratch.capacity() {
        block_len /= 2;
    }

    let ideal = n / block_len;
    trace!("sorting {n} elements with blocks of {block_len}");

    // Keys occupy `0..keys` for the whole sort
    let keys = collect_keys(v, 0, n, ideal, less);

    // Every element compares equal
    if keys < 2 {
        return;
    }

    if keys < ideal {
        debug!("collected {keys} of {ideal} keys, long merges fall back to rotations");
    }

    let len = n - keys;
    build_pairs(v, keys, len, less);

    let mut run = 2;

    while run < len {
        let mut l = keys;

        while l + run < n {
            let left = Run { start: l, len: run };
            let right = Run {
                start: left.end(),
                len: usize::min(run, n - left.end()),
            };

            merge_runs(v, left, right, keys, block_len, scratch, less);
            l += 2 * run;
        }

        run *= 2;
    }

    // Keys are first occurrences, so they win ties against the rest
    insertion_sort(v, 0, keys, less);
    merge_lazy(v, 0, keys, len, less);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_length_grows_with_square_root() {
        assert_eq!(block_length(16), 4);
        assert_eq!(block_length(100), 16);
        assert_eq!(block_length(1 << 20), 1024);
    }

    #[test]
    fn partial_block_takes_a_key() {
        let left = Run { start: 4, len: 8 };
        assert_eq!(block_keys(left, Run { start: 12, len: 8 }, 4), 4);
        assert_eq!(block_keys(left, Run { start: 12, len: 5 }, 4), 4);
        assert_eq!(block_keys(left, Run { start: 12, len: 3 }, 4), 3);
    }

    #[test]
    fn run_end() {
        assert_eq!(Run { start: 3, len: 4 }.end(), 7);
    }
}
