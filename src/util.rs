use core::mem::MaybeUninit;
use core::ptr;

/// A trait alias for comparators
pub trait Less<T>: FnMut(&T, &T) -> bool {}
impl<T, F: FnMut(&T, &T) -> bool> Less<T> for F {}

/// Two adjacent elements lifted out of a slice, leaving a vacancy of length 2.
///
/// On drop, the held elements are written back into the vacancy at `pos`, wherever it has moved
/// to in the meantime.
pub struct Hole<T> {
    /// Pointer to the first of the two vacant slots
    pub pos: *mut T,

    held: MaybeUninit<[T; 2]>,
}

impl<T> Hole<T> {
    /// Lift the elements at `pos` and `pos + 1` out of the slice.
    pub unsafe fn new(pos: *mut T) -> Self {
        let mut held = MaybeUninit::<[T; 2]>::uninit();
        ptr::copy_nonoverlapping(pos, held.as_mut_ptr().cast::<T>(), 2);
        Self { pos, held }
    }
}

impl<T> Drop for Hole<T> {
    fn drop(&mut self) {
        unsafe {
            ptr::copy_nonoverlapping(self.held.as_ptr().cast::<T>(), self.pos, 2);
        }
    }
}

/// The unmerged remainder `src..end` of a run moved into scratch space, and the slots starting at
/// `dst` it must return to.
///
/// On drop, the remainder is moved back to `dst`.
pub struct Gap<T> {
    pub src: *const T,
    pub end: *const T,
    pub dst: *mut T,
}

impl<T> Drop for Gap<T> {
    fn drop(&mut self) {
        unsafe {
            let len = self.end.offset_from(self.src) as usize;
            ptr::copy_nonoverlapping(self.src, self.dst, len);
        }
    }
}

/// Return `b` if `is_b` or `a` otherwise.
#[inline(always)]
pub fn conditional<T: Copy>(a: T, b: T, is_b: bool) -> T {
    [a, b][is_b as usize]
}

/// Exchange the regions `start..start + left_len` and `start + left_len..start + left_len +
/// right_len` in-place, preserving the order within each region.
///
/// Every element is moved exactly once. Panics if the regions are out of bounds.
pub fn rotate<T>(v: &mut [T], start: usize, left_len: usize, right_len: usize) {
    let v = &mut v[start..start + left_len + right_len];

    if left_len == 0 || right_len == 0 {
        return;
    }

    // No user code runs below, so the temporary duplicates can never be observed or dropped
    unsafe { cycle_reverse(v.as_mut_ptr(), left_len, right_len) }
}

// Cycle reverse rotation: reverse both blocks and the whole range at once, moving one element from
// each end of each block per step.
unsafe fn cycle_reverse<T>(s: *mut T, left_len: usize, right_len: usize) {
    let mut a = s;
    let mut b = s.add(left_len - 1);
    let mut c = s.add(left_len);
    let mut d = s.add(left_len + right_len - 1);

    while a < b && c < d {
        let tmp = b.read();
        b.write(a.read());
        b = b.sub(1);
        a.write(c.read());
        a = a.add(1);
        c.write(d.read());
        c = c.add(1);
        d.write(tmp);
        d = d.sub(1);
    }

    while a < b {
        let tmp = b.read();
        b.write(a.read());
        b = b.sub(1);
        a.write(d.read());
        a = a.add(1);
        d.write(tmp);
        d = d.sub(1);
    }

    while c < d {
        let tmp = c.read();
        c.write(d.read());
        c = c.add(1);
        d.write(a.read());
        d = d.sub(1);
        a.write(tmp);
        a = a.add(1);
    }

    while a < d {
        ptr::swap(a, d);
        a = a.add(1);
        d = d.sub(1);
    }
}

/// Swap the regions `a..a + len` and `b..b + len`. The regions must not overlap.
pub fn block_swap<T>(v: &mut [T], a: usize, b: usize, len: usize) {
    assert!(a + len <= b || b + len <= a, "overlapping blocks");

    for i in 0..len {
        v.swap(a + i, b + i);
    }
}

/// Return the value `i` in `0..=n` such that for all `j` in `0..i`, `f(j)` and for all `j` in
/// `i..n`, `!f(j)`. The caller guarantees `f` is partitioned in such a manner.
fn lower_bound(n: usize, mut f: impl FnMut(usize) -> bool) -> usize {
    let mut left = 0;
    let mut right = n;

    while left < right {
        let middle = left + (right - left) / 2;

        if f(middle) {
            left = middle + 1;
        } else {
            right = middle;
        }
    }

    left
}

/// Return the number of elements in the sorted region `start..start + len` which are `less` than
/// `target`.
pub fn search_left<T, F: Less<T>>(
    v: &[T],
    start: usize,
    len: usize,
    target: &T,
    less: &mut F,
) -> usize {
    let s = &v[start..start + len];
    lower_bound(len, |i| less(&s[i], target))
}

/// Return the number of elements in the sorted region `start..start + len` which `target` is not
/// `less` than.
pub fn search_right<T, F: Less<T>>(
    v: &[T],
    start: usize,
    len: usize,
    target: &T,
    less: &mut F,
) -> usize {
    let s = &v[start..start + len];
    lower_bound(len, |i| !less(target, &s[i]))
}
