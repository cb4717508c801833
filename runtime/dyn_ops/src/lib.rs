//! Operator engine for the dyn scripting runtime.
//!
//! Every binary operator takes `(target, other)` and writes its result into
//! `target`:
//! - a reference `target` is first replaced by an owned copy of its target,
//!   so the aliased value is never mutated;
//! - a reference `other` is read through without copying;
//! - on failure `target` is reset to `None` and the error is returned.
//!
//! Arithmetic picks its behavior from the larger of the two operand types
//! (see [`ValueType`](dyn_value::ValueType)). Relational operators are built
//! on [`dyn_value::compare`]. Logical operators use Kleene three-valued logic
//! where `None` and functions are unknown.

mod arithmetic;
mod bitwise;
mod errors;
mod logical;
mod operators;
mod relational;

#[cfg(test)]
mod tests;

pub use arithmetic::{add, div, fast_approx_pow, modulo, mul, neg, pow, sub};
pub use bitwise::{bit_and, bit_not, bit_or, bit_xor, shift_left, shift_right};
pub use errors::{OpError, OpResult};
pub use logical::{and, kleene_and, kleene_not, kleene_or, kleene_xor, not, or, xor};
pub use operators::{evaluate_binary, evaluate_unary, BinaryOp, UnaryOp};
pub use relational::{contained_in, eq, ge, gt, le, lt, ne};
