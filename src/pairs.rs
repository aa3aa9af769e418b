use core::ptr;

use crate::util::{conditional, Hole, Less};

/// Sort disjoint pairs of `start..start + len` and write each pair two slots to the left of where
/// it was read, swapping with the two elements in front of `start`.
///
/// Afterwards `start - 2..start + len - 2` holds sorted runs of length 2 (plus a single trailing
/// element if `len` is odd), and the two elements displaced from `start - 2..start` sit at
/// `start + len - 2..start + len` in unspecified order.
pub fn pairwise_swaps<T, F: Less<T>>(v: &mut [T], start: usize, len: usize, less: &mut F) {
    assert!(start >= 2, "pair building needs two free slots in front of `start`");
    assert!(start + len <= v.len(), "pair building out of bounds");

    let mut i = 1;

    while i < len {
        let left = start + i - 1;
        let right = start + i;

        if less(&v[right], &v[left]) {
            v.swap(left - 2, right);
            v.swap(right - 2, left);
        } else {
            v.swap(left - 2, left);
            v.swap(right - 2, right);
        }

        i += 2;
    }

    let left = start + i - 1;

    if left < start + len {
        v.swap(left - 2, left);
    }
}

/// Like [`pairwise_swaps`], but with plain writes instead of swaps.
///
/// The two elements in front of `start` are held aside for the duration of the pass and dropped
/// into the two slots vacated at `start + len - 2..start + len`, keeping their order.
pub fn pairwise_writes<T, F: Less<T>>(v: &mut [T], start: usize, len: usize, less: &mut F) {
    assert!(start >= 2, "pair building needs two free slots in front of `start`");
    assert!(start + len <= v.len(), "pair building out of bounds");

    if len == 0 {
        return;
    }

    unsafe {
        let s = v.as_mut_ptr().add(start);

        // The vacancy always trails the next unread pair by exactly two slots
        let mut hole = Hole::new(s.sub(2));
        let mut i = 1;

        while i < len {
            let left = s.add(i - 1);
            let right = s.add(i);

            let is_swap = less(&*right, &*left);
            ptr::copy_nonoverlapping(conditional(left, right, is_swap), hole.pos, 1);
            ptr::copy_nonoverlapping(conditional(right, left, is_swap), hole.pos.add(1), 1);
            hole.pos = left;

            i += 2;
        }

        if i - 1 < len {
            ptr::copy_nonoverlapping(s.add(i - 1), hole.pos, 1);
            hole.pos = hole.pos.add(1);
        }
    }
}
