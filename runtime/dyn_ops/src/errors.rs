//! Operator failures.
//!
//! A failed operator has already reset its target to `None` by the time
//! one of these is returned. Rejections are ordinary outcomes for a dynamic
//! language, so they are logged at debug level only.

use dyn_value::{Value, ValueError, ValueType};
use thiserror::Error;

use crate::operators::{BinaryOp, UnaryOp};

/// Result of an operator. The value itself lands in the target.
pub type OpResult = Result<(), OpError>;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum OpError {
    #[error("operator '{op}' is not defined for {left} and {right}")]
    InvalidOperands {
        op: BinaryOp,
        left: ValueType,
        right: ValueType,
    },

    #[error("operator '{op}' is not defined for {operand}")]
    InvalidOperand { op: UnaryOp, operand: ValueType },

    #[error("operator '{op}' cannot order {left} and {right}")]
    Incomparable {
        op: BinaryOp,
        left: ValueType,
        right: ValueType,
    },

    #[error("division by zero")]
    DivisionByZero,

    #[error("modulo by zero")]
    ModuloByZero,

    #[error("shift amount {amount} is outside 0..32")]
    ShiftOutOfRange { amount: i32 },

    #[error(transparent)]
    Value(#[from] ValueError),
}

/// Binary operator applied to an unsupported pair of types.
#[cold]
pub(crate) fn invalid_operands(op: BinaryOp, left: &Value, right: &Value) -> OpError {
    let (left, right) = (left.resolved_type(), right.resolved_type());
    tracing::debug!(op = op.as_symbol(), %left, %right, "operands rejected");
    OpError::InvalidOperands { op, left, right }
}

/// Unary operator applied to an unsupported type.
#[cold]
pub(crate) fn invalid_operand(op: UnaryOp, operand: &Value) -> OpError {
    let operand = operand.resolved_type();
    tracing::debug!(op = op.as_symbol(), %operand, "operand rejected");
    OpError::InvalidOperand { op, operand }
}

/// Ordering requested between incomparable types.
#[cold]
pub(crate) fn incomparable(op: BinaryOp, left: &Value, right: &Value) -> OpError {
    let (left, right) = (left.resolved_type(), right.resolved_type());
    tracing::debug!(op = op.as_symbol(), %left, %right, "incomparable operands");
    OpError::Incomparable { op, left, right }
}
