//! Bitwise operators. Defined for `Int` operands only.

use dyn_value::Value;

use crate::errors::{invalid_operand, invalid_operands, OpError, OpResult};
use crate::operators::{apply, apply_unary, BinaryOp, UnaryOp};

pub fn bit_and(target: &mut Value, other: &Value) -> OpResult {
    apply(target, other, |t, o| bitwise(t, o, BinaryOp::BitAnd))
}

pub fn bit_or(target: &mut Value, other: &Value) -> OpResult {
    apply(target, other, |t, o| bitwise(t, o, BinaryOp::BitOr))
}

pub fn bit_xor(target: &mut Value, other: &Value) -> OpResult {
    apply(target, other, |t, o| bitwise(t, o, BinaryOp::BitXor))
}

/// Shift left; bits shifted past the top are lost.
pub fn shift_left(target: &mut Value, other: &Value) -> OpResult {
    apply(target, other, |t, o| bitwise(t, o, BinaryOp::Shl))
}

/// Arithmetic shift right, keeping the sign.
pub fn shift_right(target: &mut Value, other: &Value) -> OpResult {
    apply(target, other, |t, o| bitwise(t, o, BinaryOp::Shr))
}

pub fn bit_not(target: &mut Value) -> OpResult {
    apply_unary(target, |t| match t {
        Value::Int(n) => {
            *n = !*n;
            Ok(())
        }
        other => Err(invalid_operand(UnaryOp::BitNot, other)),
    })
}

fn bitwise(target: &mut Value, other: &Value, op: BinaryOp) -> OpResult {
    let (Value::Int(a), Value::Int(b)) = (&*target, other) else {
        return Err(invalid_operands(op, target, other));
    };
    let (a, b) = (*a, *b);
    let result = match op {
        BinaryOp::BitAnd => a & b,
        BinaryOp::BitOr => a | b,
        BinaryOp::BitXor => a ^ b,
        BinaryOp::Shl => a << shift_amount(b)?,
        BinaryOp::Shr => a >> shift_amount(b)?,
        _ => return Err(invalid_operands(op, target, other)),
    };
    target.set_int(result);
    Ok(())
}

fn shift_amount(amount: i32) -> Result<u32, OpError> {
    u32::try_from(amount)
        .ok()
        .filter(|bits| *bits < i32::BITS)
        .ok_or(OpError::ShiftOutOfRange { amount })
}
