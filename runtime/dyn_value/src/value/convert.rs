//! Coercions and textual rendering.
//!
//! Coercions never fail: anything without a meaningful truth or numeric
//! value maps to `false`/`0`. Rendering is split into [`Value::rendered_len`]
//! and [`Value::render`] so a caller can size a buffer exactly before
//! writing.

use std::fmt::{self, Write};

use super::{Trilean, Value};
use crate::errors::{reserve_str, ValueError, ValueResult};
use crate::stack::ensure_sufficient_stack;
use crate::strings;

/// Rendering of a function value.
pub const FUNCTION_TOKEN: &str = "FCT";
/// Rendering of an external pointer.
pub const EXTERNAL_TOKEN: &str = "ex";
/// Rendering of `None` and of the misc marker.
pub const NONE_TOKEN: char = '$';

impl Value {
    /// Truthiness: non-zero numbers, non-empty strings and containers.
    pub fn to_bool(&self) -> bool {
        self.with_resolved(|value| match value {
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(list) => !list.is_empty(),
            Value::Set(set) => !set.is_empty(),
            Value::Dict(dict) => !dict.borrow().is_empty(),
            _ => false,
        })
    }

    /// Integer coercion. Floats truncate toward zero and saturate.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "float to int truncation is the language's coercion"
    )]
    pub fn to_int(&self) -> i32 {
        self.with_resolved(|value| match value {
            Value::Bool(b) => i32::from(*b),
            Value::Int(n) => *n,
            Value::Float(f) => *f as i32,
            _ => 0,
        })
    }

    /// Float coercion.
    #[allow(
        clippy::cast_precision_loss,
        reason = "int to float rounding is the language's coercion"
    )]
    pub fn to_float(&self) -> f32 {
        self.with_resolved(|value| match value {
            Value::Bool(b) => f32::from(u8::from(*b)),
            Value::Int(n) => *n as f32,
            Value::Float(f) => *f,
            _ => 0.0,
        })
    }

    /// Three-valued truth: `None` and functions are unknown.
    pub fn to_bool3(&self) -> Trilean {
        self.with_resolved(|value| match value {
            Value::None | Value::Function(_) => Trilean::Unknown,
            other => Trilean::from(other.to_bool()),
        })
    }

    /// Exact byte length of [`Value::render`]'s output.
    pub fn rendered_len(&self) -> usize {
        ensure_sufficient_stack(|| match self {
            Value::None | Value::Misc | Value::Bool(_) => 1,
            Value::Int(n) => strings::int_len(*n),
            Value::Float(f) => strings::float_len(*f),
            Value::Str(s) => s.len(),
            Value::List(list) => sequence_len(list.iter()),
            Value::Set(set) => sequence_len(set.iter()),
            Value::Dict(dict) => {
                let dict = dict.borrow();
                let entries: usize = dict
                    .iter()
                    .map(|(key, value)| key.len() + 1 + value.rendered_len())
                    .sum();
                2 + dict.len().saturating_sub(1) + entries
            }
            Value::Function(_) => FUNCTION_TOKEN.len(),
            Value::External(_) => EXTERNAL_TOKEN.len(),
            Value::Reference(reference) => reference.read(Value::rendered_len),
        })
    }

    /// Write the textual form of the value.
    ///
    /// Bools are `0`/`1`, floats carry six fractional digits, strings are
    /// written bare, lists as `[a,b]`, sets as `{a,b}`, dicts as `{k:v}`.
    pub fn render<W: Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
        ensure_sufficient_stack(|| match self {
            Value::None | Value::Misc => out.write_char(NONE_TOKEN),
            Value::Bool(b) => out.write_char(if *b { '1' } else { '0' }),
            Value::Int(n) => write!(out, "{n}"),
            Value::Float(f) => strings::write_float(out, *f),
            Value::Str(s) => out.write_str(s),
            Value::List(list) => render_sequence(out, '[', list.iter(), ']'),
            Value::Set(set) => render_sequence(out, '{', set.iter(), '}'),
            Value::Dict(dict) => {
                out.write_char('{')?;
                for (i, (key, value)) in dict.borrow().iter().enumerate() {
                    if i > 0 {
                        out.write_char(',')?;
                    }
                    out.write_str(key)?;
                    out.write_char(':')?;
                    value.render(out)?;
                }
                out.write_char('}')
            }
            Value::Function(_) => out.write_str(FUNCTION_TOKEN),
            Value::External(_) => out.write_str(EXTERNAL_TOKEN),
            Value::Reference(reference) => reference.read(|value| value.render(out)),
        })
    }

    /// Render into a buffer allocated once at the exact size.
    pub fn try_to_string(&self) -> ValueResult<String> {
        let len = self.rendered_len();
        let mut out = String::new();
        reserve_str(&mut out, len)?;
        self.render(&mut out)
            .map_err(|fmt::Error| ValueError::Allocation { requested: len })?;
        Ok(out)
    }
}

fn sequence_len<'a>(items: impl ExactSizeIterator<Item = &'a Value>) -> usize {
    let count = items.len();
    2 + count.saturating_sub(1) + items.map(Value::rendered_len).sum::<usize>()
}

fn render_sequence<'a, W: Write + ?Sized>(
    out: &mut W,
    open: char,
    items: impl Iterator<Item = &'a Value>,
    close: char,
) -> fmt::Result {
    out.write_char(open)?;
    for (i, item) in items.enumerate() {
        if i > 0 {
            out.write_char(',')?;
        }
        item.render(out)?;
    }
    out.write_char(close)
}
