use core::ops::Range;

use crate::{
    error::RangeError,
    grit, keys, pairs,
    scratch::{Scratch, DEFAULT_SCRATCH_LEN},
    util::{self, Less},
};

/// Settings for an [`Engine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Number of elements of scratch space the engine owns
    pub scratch_len: usize,
}

impl Config {
    /// A configuration that owns no scratch space; every merge is done in-place.
    pub fn without_scratch() -> Self {
        Self { scratch_len: 0 }
    }

    /// Set the number of elements of scratch space.
    pub fn scratch_len(self, scratch_len: usize) -> Self {
        Self { scratch_len }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scratch_len: DEFAULT_SCRATCH_LEN,
        }
    }
}

/// An ordering function bound to scratch space for one element type.
///
/// All operations take a caller-owned slice and caller-validated ranges; out of bounds ranges
/// panic. The scratch space only changes how fast [`Engine::sort`] runs, never its result.
pub struct Engine<T, F> {
    less: F,
    scratch: Scratch<T>,
    config: Config,
}

impl<T, F: Less<T>> Engine<T, F> {
    /// Create an engine ordering elements by `less`, with default scratch space.
    pub fn new(less: F) -> Self {
        Self::with_config(less, Config::default())
    }

    /// Create an engine ordering elements by `less`, with settings from `config`.
    pub fn with_config(less: F, config: Config) -> Self {
        Self {
            less,
            scratch: Scratch::with_len(config.scratch_len),
            config,
        }
    }

    /// Return the settings this engine was created with.
    pub fn config(&self) -> Config {
        self.config
    }

    /// See [`crate::rotate`].
    pub fn rotate(&self, v: &mut [T], start: usize, left_len: usize, right_len: usize) {
        util::rotate(v, start, left_len, right_len);
    }

    /// See [`crate::block_swap`].
    pub fn block_swap(&self, v: &mut [T], a: usize, b: usize, len: usize) {
        util::block_swap(v, a, b, len);
    }

    /// See [`crate::insertion_sort`].
    pub fn insertion_sort(&mut self, v: &mut [T], start: usize, len: usize) {
        grit::insertion_sort(v, start, len, &mut self.less);
    }

    /// See [`crate::search_left`].
    pub fn search_left(&mut self, v: &[T], start: usize, len: usize, target: &T) -> usize {
        util::search_left(v, start, len, target, &mut self.less)
    }

    /// See [`crate::search_right`].
    pub fn search_right(&mut self, v: &[T], start: usize, len: usize, target: &T) -> usize {
        util::search_right(v, start, len, target, &mut self.less)
    }

    /// See [`crate::collect_keys`].
    pub fn collect_keys(&mut self, v: &mut [T], start: usize, len: usize, ideal: usize) -> usize {
        keys::collect_keys(v, start, len, ideal, &mut self.less)
    }

    /// See [`crate::pairwise_swaps`].
    pub fn pairwise_swaps(&mut self, v: &mut [T], start: usize, len: usize) {
        pairs::pairwise_swaps(v, start, len, &mut self.less);
    }

    /// See [`crate::pairwise_writes`].
    pub fn pairwise_writes(&mut self, v: &mut [T], start: usize, len: usize) {
        pairs::pairwise_writes(v, start, len, &mut self.less);
    }

    /// Sort `v` stably.
    pub fn sort(&mut self, v: &mut [T]) {
        // Ignore ZSTs
        if core::mem::size_of::<T>() == 0 {
            return;
        }

        grit::sort(v, &mut self.scratch, &mut self.less);
    }

    /// Sort the region `range` of `v` stably, leaving the rest of `v` untouched.
    pub fn sort_range(&mut self, v: &mut [T], range: Range<usize>) -> Result<(), RangeError> {
        RangeError::check(&range, v.len())?;
        self.sort(&mut v[range]);
        Ok(())
    }
}
