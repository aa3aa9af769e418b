#![cfg_attr(not(test), no_std)]

//! In-place building blocks for stable block merge sorting, and a sort built on them.
//!
//! Every primitive works on a caller-owned slice and moves elements around with at most a fixed
//! amount of extra storage:
//!
//! - [`rotate`] exchanges two adjacent blocks
//! - [`insertion_sort`] sorts short ranges
//! - [`search_left`] and [`search_right`] find stable insertion points
//! - [`collect_keys`] gathers distinct elements used to tag blocks
//! - [`pairwise_swaps`] and [`pairwise_writes`] build sorted pairs while vacating slots
//!
//! [`Engine`] binds one ordering function to them.

extern crate alloc;

use core::cmp::Ordering;

mod blocks;
mod engine;
mod error;
mod grit;
mod keys;
mod merge;
mod pairs;
mod scratch;
mod util;

pub use engine::{Config, Engine};
pub use error::RangeError;
pub use grit::{insertion_sort, Run};
pub use keys::collect_keys;
pub use merge::{MergeCursor, Origin};
pub use pairs::{pairwise_swaps, pairwise_writes};
pub use scratch::DEFAULT_SCRATCH_LEN;
pub use util::{block_swap, rotate, search_left, search_right, Less};

/// Sort `v`.
#[inline(always)]
pub fn sort<T: Ord>(v: &mut [T]) {
    Engine::new(T::lt).sort(v);
}

/// Sort `v` with a comparator `compare`.
#[inline(always)]
pub fn sort_by<T, F: FnMut(&T, &T) -> Ordering>(v: &mut [T], mut compare: F) {
    Engine::new(|x: &T, y: &T| compare(x, y) == Ordering::Less).sort(v);
}

/// Sort `v` with a key extraction function `f`.
#[inline(always)]
pub fn sort_by_key<T, K: Ord, F: FnMut(&T) -> K>(v: &mut [T], mut f: F) {
    Engine::new(|x: &T, y: &T| f(x).lt(&f(y))).sort(v);
}
