//! Container sizing constants.
//!
//! Lengths and capacities are bounded by [`MAX_LEN`]. The default ceiling is
//! 16 bits wide so that container counts fit the codec's two-byte length
//! field; the `wide-len` feature lifts it to 32 bits. Strings built by the
//! runtime are bounded separately by [`MAX_STR_LEN`].

use crate::errors::{ValueError, ValueResult};

/// Slots added when a full list grows. A list shrinks by the same amount
/// once its slack exceeds one increment.
pub const LIST_INCREMENT: usize = 5;

/// Entries added when a full dict grows.
pub const DICT_INCREMENT: usize = 6;

/// Largest length or capacity a list, set or dict may reach.
#[cfg(not(feature = "wide-len"))]
pub const MAX_LEN: usize = 0xFFFF;

/// Largest length or capacity a list, set or dict may reach.
#[cfg(feature = "wide-len")]
pub const MAX_LEN: usize = 0xFFFF_FFFF;

/// Longest string, in bytes, that concatenation or repetition may build.
pub const MAX_STR_LEN: usize = 1 << 24;

/// Fail with [`ValueError::StringTooLong`] if `requested` is over the ceiling.
#[inline]
pub fn check_str_len(requested: usize) -> ValueResult<()> {
    if requested > MAX_STR_LEN {
        Err(ValueError::StringTooLong {
            requested,
            limit: MAX_STR_LEN,
        })
    } else {
        Ok(())
    }
}

/// Fail with [`ValueError::CapacityExceeded`] if `requested` is over the ceiling.
#[inline]
pub fn check_len(requested: usize) -> ValueResult<()> {
    if requested > MAX_LEN {
        Err(ValueError::CapacityExceeded {
            requested,
            limit: MAX_LEN,
        })
    } else {
        Ok(())
    }
}
