//! Operator kinds and direct dispatch.
//!
//! The operator set is fixed, so dispatch is a plain `match` rather than a
//! table of trait objects.

use std::fmt;

use dyn_value::Value;

use crate::errors::{OpError, OpResult};
use crate::{arithmetic, bitwise, logical, relational};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    In,

    // Logical
    And,
    Or,
    Xor,

    // Bitwise
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
}

impl BinaryOp {
    /// Source-level symbol, used in error messages.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Pow => "**",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::In => "in",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
            BinaryOp::Xor => "xor",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Neg,
    Not,
    BitNot,
}

impl UnaryOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "not",
            UnaryOp::BitNot => "~",
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

/// Apply `op` to `target` and `other`, storing the result in `target`.
pub fn evaluate_binary(target: &mut Value, other: &Value, op: BinaryOp) -> OpResult {
    match op {
        BinaryOp::Add => arithmetic::add(target, other),
        BinaryOp::Sub => arithmetic::sub(target, other),
        BinaryOp::Mul => arithmetic::mul(target, other),
        BinaryOp::Div => arithmetic::div(target, other),
        BinaryOp::Mod => arithmetic::modulo(target, other),
        BinaryOp::Pow => arithmetic::pow(target, other),
        BinaryOp::Eq => relational::eq(target, other),
        BinaryOp::NotEq => relational::ne(target, other),
        BinaryOp::Lt => relational::lt(target, other),
        BinaryOp::LtEq => relational::le(target, other),
        BinaryOp::Gt => relational::gt(target, other),
        BinaryOp::GtEq => relational::ge(target, other),
        BinaryOp::In => relational::contained_in(target, other),
        BinaryOp::And => logical::and(target, other),
        BinaryOp::Or => logical::or(target, other),
        BinaryOp::Xor => logical::xor(target, other),
        BinaryOp::BitAnd => bitwise::bit_and(target, other),
        BinaryOp::BitOr => bitwise::bit_or(target, other),
        BinaryOp::BitXor => bitwise::bit_xor(target, other),
        BinaryOp::Shl => bitwise::shift_left(target, other),
        BinaryOp::Shr => bitwise::shift_right(target, other),
    }
}

/// Apply `op` to `target` in place.
pub fn evaluate_unary(target: &mut Value, op: UnaryOp) -> OpResult {
    match op {
        UnaryOp::Neg => arithmetic::neg(target),
        UnaryOp::Not => logical::not(target),
        UnaryOp::BitNot => bitwise::bit_not(target),
    }
}

/// Replace a reference with an owned copy of its target.
pub(crate) fn detach(target: &mut Value) -> Result<(), OpError> {
    if let Value::Reference(reference) = target {
        let owned = reference.read(Value::deep_copy)?;
        *target = owned;
    }
    Ok(())
}

/// Run a binary operator body on an owned target and a resolved operand.
///
/// Any failure, including one raised while detaching, leaves `target` as
/// `None`.
pub(crate) fn apply(
    target: &mut Value,
    other: &Value,
    body: impl FnOnce(&mut Value, &Value) -> OpResult,
) -> OpResult {
    let result = detach(target).and_then(|()| other.with_resolved(|other| body(target, other)));
    if result.is_err() {
        target.set_none();
    }
    result
}

/// Run a unary operator body on an owned target.
pub(crate) fn apply_unary(
    target: &mut Value,
    body: impl FnOnce(&mut Value) -> OpResult,
) -> OpResult {
    let result = detach(target).and_then(|()| body(target));
    if result.is_err() {
        target.set_none();
    }
    result
}
