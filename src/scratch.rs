use alloc::vec::Vec;

/// Default number of elements in a sort's scratch space.
pub const DEFAULT_SCRATCH_LEN: usize = 512;

/// Fixed-capacity auxiliary storage for merging.
///
/// Holds no live elements between operations: elements are moved in and moved back out within a
/// single merge.
pub struct Scratch<T> {
    buf: Vec<T>,
    len: usize,
}

impl<T> Scratch<T> {
    /// Allocate scratch space for `len` elements.
    pub fn with_len(len: usize) -> Self {
        Self {
            buf: Vec::with_capacity(len),
            len,
        }
    }

    /// Return the number of elements this scratch space can hold.
    pub fn capacity(&self) -> usize {
        self.len
    }

    /// Return a pointer to the start of the uninitialized storage.
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.as_mut_ptr()
    }
}
