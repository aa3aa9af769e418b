use core::ptr;

use crate::{
    scratch::Scratch,
    util::{conditional, rotate, search_left, search_right, Gap, Less},
};

/// The run a block or fragment was cut from during a block merge
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    Left,
    Right,
}

impl Origin {
    fn flip(self) -> Self {
        match self {
            Origin::Left => Origin::Right,
            Origin::Right => Origin::Left,
        }
    }
}

/// State carried from one block to the next during a block merge pass: the length of the
/// still-unmerged fragment in front of the next block and the run it came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MergeCursor {
    pub block_len: usize,
    pub origin: Origin,
}

impl MergeCursor {
    /// Begin a pass with one untouched block from `origin`.
    pub fn new(block_len: usize, origin: Origin) -> Self {
        Self { block_len, origin }
    }
}

/// Merge runs `s..s + n1` and `s + n1..s + n1 + n2` into `s..s + n1 + n2` with rotations.
pub fn merge_lazy<T, F: Less<T>>(
    v: &mut [T],
    mut s: usize,
    mut n1: usize,
    mut n2: usize,
    less: &mut F,
) {
    if n2 <= n1 {
        while n2 > 0 {
            let next_1 = search_right(v, s, n1, &v[s + n1 + n2 - 1], less);

            rotate(v, s + next_1, n1 - next_1, n2);
            n1 = next_1;

            if n1 == 0 {
                break;
            }

            n2 = search_left(v, s + n1, n2 - 1, &v[s + n1 - 1], less);
        }
    } else {
        while n1 > 0 {
            let r_adv = search_left(v, s + n1, n2, &v[s], less);

            rotate(v, s, n1, r_adv);
            s += r_adv;
            n2 -= r_adv;

            if n2 == 0 {
                break;
            }

            let l_adv = 1 + search_right(v, s + 1, n1 - 1, &v[s + n1], less);
            s += l_adv;
            n1 -= l_adv;
        }
    }
}

/// Merge runs `s..s + n1` and `s + n1..s + n1 + n2` by moving the left run into `scratch` and
/// merging forwards. The left run must fit in `scratch`.
pub fn merge_buffered<T, F: Less<T>>(
    v: &mut [T],
    s: usize,
    n1: usize,
    n2: usize,
    scratch: &mut Scratch<T>,
    less: &mut F,
) {
    assert!(n1 <= scratch.capacity(), "left run does not fit in scratch");
    let v = &mut v[s..s + n1 + n2];

    unsafe {
        merge_forward(v.as_mut_ptr(), n1, n2, scratch.as_mut_ptr(), |r, l| less(r, l));
    }
}

// Move `s..s + n1` into `buf` and merge it forwards with `s + n1..s + n1 + n2` until either side
// runs out. The right element goes first iff `take_right(right, left)`.
//
// Return how many elements of the left and the right side were left over. They end up at the end
// of the range.
unsafe fn merge_forward<T>(
    s: *mut T,
    n1: usize,
    n2: usize,
    buf: *mut T,
    mut take_right: impl FnMut(&T, &T) -> bool,
) -> (usize, usize) {
    ptr::copy_nonoverlapping(s, buf, n1);

    // Whatever is left in scratch when the loop ends (or the comparator panics) fills the gap
    // exactly
    let mut gap = Gap {
        src: buf as *const T,
        end: buf.add(n1) as *const T,
        dst: s,
    };

    let mut r = s.add(n1) as *const T;
    let end = s.add(n1 + n2) as *const T;

    while gap.src < gap.end && r < end {
        let is_r = take_right(&*r, &*gap.src);
        ptr::copy_nonoverlapping(conditional(gap.src, r, is_r), gap.dst, 1);

        gap.src = gap.src.add(!is_r as usize);
        r = r.add(is_r as usize);
        gap.dst = gap.dst.add(1);
    }

    (
        gap.end.offset_from(gap.src) as usize,
        end.offset_from(r) as usize,
    )
}

/// Merge the fragment `s..s + cursor.block_len` with the block of `right_len` elements following
/// it, using rotations.
///
/// Ties go to the fragment if it came from the left run. Return the cursor describing the new
/// unmerged fragment at the end of `s..s + cursor.block_len + right_len`.
pub fn merge_fragment<T, F: Less<T>>(
    v: &mut [T],
    mut s: usize,
    cursor: MergeCursor,
    mut right_len: usize,
    less: &mut F,
) -> MergeCursor {
    let MergeCursor {
        block_len: mut left_len,
        origin,
    } = cursor;

    match origin {
        Origin::Left if less(&v[s + left_len], &v[s + left_len - 1]) => {
            while left_len > 0 {
                let r_adv = search_left(v, s + left_len, right_len, &v[s], less);

                if r_adv > 0 {
                    rotate(v, s, left_len, r_adv);
                    s += r_adv;
                    right_len -= r_adv;
                }

                if right_len == 0 {
                    return MergeCursor::new(left_len, origin);
                }

                s += 1;
                left_len -= 1;

                while left_len > 0 && !less(&v[s + left_len], &v[s]) {
                    s += 1;
                    left_len -= 1;
                }
            }
        }
        Origin::Right if !less(&v[s + left_len - 1], &v[s + left_len]) => {
            while left_len > 0 {
                let r_adv = search_right(v, s + left_len, right_len, &v[s], less);

                if r_adv > 0 {
                    rotate(v, s, left_len, r_adv);
                    s += r_adv;
                    right_len -= r_adv;
                }

                if right_len == 0 {
                    return MergeCursor::new(left_len, origin);
                }

                s += 1;
                left_len -= 1;

                while left_len > 0 && less(&v[s], &v[s + left_len]) {
                    s += 1;
                    left_len -= 1;
                }
            }
        }
        _ => {}
    }

    // The fragment is used up, the rest of the block becomes the new fragment
    MergeCursor::new(right_len, origin.flip())
}

/// Merge the fragment `s..s + cursor.block_len` with the block of `right_len` elements following
/// it through `scratch`. Same contract as [`merge_fragment`], and the fragment must fit in
/// `scratch`.
pub fn merge_fragment_buffered<T, F: Less<T>>(
    v: &mut [T],
    s: usize,
    cursor: MergeCursor,
    right_len: usize,
    scratch: &mut Scratch<T>,
    less: &mut F,
) -> MergeCursor {
    let MergeCursor {
        block_len: left_len,
        origin,
    } = cursor;
    assert!(left_len <= scratch.capacity(), "fragment does not fit in scratch");

    let v = &mut v[s..s + left_len + right_len];
    let ordered = match origin {
        Origin::Left => !less(&v[left_len], &v[left_len - 1]),
        Origin::Right => less(&v[left_len - 1], &v[left_len]),
    };

    if ordered {
        return MergeCursor::new(right_len, origin.flip());
    }

    let s = v.as_mut_ptr();
    let buf = scratch.as_mut_ptr();
    let (left_rest, right_rest) = unsafe {
        match origin {
            Origin::Left => merge_forward(s, left_len, right_len, buf, |r, l| less(r, l)),
            Origin::Right => merge_forward(s, left_len, right_len, buf, |r, l| !less(l, r)),
        }
    };

    if left_rest > 0 {
        MergeCursor::new(left_rest, origin)
    } else {
        // The fragment is used up, the rest of the block becomes the new fragment
        MergeCursor::new(right_rest, origin.flip())
    }
}
