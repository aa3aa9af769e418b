use core::ops::Range;

use thiserror::Error;

/// A caller-supplied range that does not describe a region of the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("range starts at {start} but ends at {end}")]
    Inverted { start: usize, end: usize },

    #[error("range end {end} is out of bounds for a sequence of length {len}")]
    OutOfBounds { end: usize, len: usize },
}

impl RangeError {
    /// Check that `range` lies within a sequence of length `len`.
    pub fn check(range: &Range<usize>, len: usize) -> Result<(), Self> {
        if range.start > range.end {
            return Err(Self::Inverted {
                start: range.start,
                end: range.end,
            });
        }

        if range.end > len {
            return Err(Self::OutOfBounds {
                end: range.end,
                len,
            });
        }

        Ok(())
    }
}
