//! Error type shared by every fallible value operation.
//!
//! A failing constructor or copy never leaves a half-built value behind: the
//! destination is reset to `None` before the error is returned.

use thiserror::Error;

use crate::value::ValueType;

/// Result of a fallible value operation.
pub type ValueResult<T> = Result<T, ValueError>;

/// Why a value operation failed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValueError {
    /// The allocator refused to provide storage.
    #[error("out of memory reserving {requested} more elements")]
    Allocation { requested: usize },

    /// A container would grow past [`MAX_LEN`](crate::limits::MAX_LEN).
    #[error("capacity {requested} exceeds the container limit of {limit}")]
    CapacityExceeded { requested: usize, limit: usize },

    /// Concatenation or repetition would build a string past
    /// [`MAX_STR_LEN`](crate::limits::MAX_STR_LEN) bytes.
    #[error("string of {requested} bytes exceeds the limit of {limit}")]
    StringTooLong { requested: usize, limit: usize },

    /// A resize asked for less room than the elements already stored.
    #[error("capacity {requested} is below the current length {len}")]
    BelowLength { requested: usize, len: usize },

    /// An index fell outside `[0, len)` after negative-index normalization.
    #[error("index {index} is out of range for length {len}")]
    IndexOutOfRange { index: isize, len: usize },

    /// A payload of the wrong type was supplied.
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: ValueType,
        found: ValueType,
    },
}

/// Reserve room for `additional` more elements, reporting allocator failure.
pub(crate) fn reserve_vec<T>(vec: &mut Vec<T>, additional: usize) -> ValueResult<()> {
    vec.try_reserve_exact(additional)
        .map_err(|_| ValueError::Allocation {
            requested: additional,
        })
}

/// Reserve room for `additional` more bytes, reporting allocator failure.
pub(crate) fn reserve_str(text: &mut String, additional: usize) -> ValueResult<()> {
    text.try_reserve_exact(additional)
        .map_err(|_| ValueError::Allocation {
            requested: additional,
        })
}
