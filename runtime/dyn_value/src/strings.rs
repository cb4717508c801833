//! Text helpers used to render and compare values.
//!
//! Rendering runs in two passes: a length pass that sizes the buffer
//! exactly, then a write pass. The `*_len` helpers here must agree byte for
//! byte with the matching `write_*` helpers.

use std::cmp::Ordering;
use std::fmt::{self, Write};

use crate::errors::{reserve_str, ValueResult};
use crate::limits::check_str_len;

/// Fractional digits used when rendering a float.
pub const FLOAT_PRECISION: usize = 6;

/// `fmt::Write` sink that only counts bytes.
struct LenCounter(usize);

impl Write for LenCounter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0 += s.len();
        Ok(())
    }
}

/// Number of bytes in the decimal rendering of `value`.
pub fn int_len(value: i32) -> usize {
    let mut rest = value.unsigned_abs();
    let mut digits = 1;
    while rest >= 10 {
        rest /= 10;
        digits += 1;
    }
    digits + usize::from(value < 0)
}

/// Number of bytes [`write_float`] produces for `value`.
pub fn float_len(value: f32) -> usize {
    let mut counter = LenCounter(0);
    // LenCounter never fails.
    let _ = write_float(&mut counter, value);
    counter.0
}

/// Write `value` with [`FLOAT_PRECISION`] fractional digits.
pub fn write_float<W: Write + ?Sized>(out: &mut W, value: f32) -> fmt::Result {
    write!(out, "{value:.FLOAT_PRECISION$}")
}

/// Lexicographic byte comparison.
#[inline]
pub fn compare(left: &str, right: &str) -> Ordering {
    left.as_bytes().cmp(right.as_bytes())
}

/// Concatenate two strings into a freshly allocated buffer.
pub fn concat(left: &str, right: &str) -> ValueResult<String> {
    let total = left.len().saturating_add(right.len());
    check_str_len(total)?;
    let mut out = String::new();
    reserve_str(&mut out, total)?;
    out.push_str(left);
    out.push_str(right);
    Ok(out)
}

/// Repeat `text` `count` times into a freshly allocated buffer.
pub fn repeat(text: &str, count: usize) -> ValueResult<String> {
    let total = text.len().saturating_mul(count);
    check_str_len(total)?;
    let mut out = String::new();
    reserve_str(&mut out, total)?;
    for _ in 0..count {
        out.push_str(text);
    }
    Ok(out)
}

#[cfg(test)]
mod tests;
