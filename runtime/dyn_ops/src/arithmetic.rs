//! Arithmetic operators.
//!
//! The operand pair is classified by the larger of the two types:
//! - `Bool`/`Int`: wrapping integer arithmetic, result is always `Int`
//! - `Float`: IEEE arithmetic on both operands coerced to float
//! - `Str`: `+` concatenates renderings, `*` repeats by an `Int`
//! - `List`: `+` appends or prepends, `*` repeats by an `Int`
//! - `Set`: `+` is union or insertion, `-` is difference or removal
//! - `Dict`: `+` merges the right dict into the left
//!
//! `**` only takes numbers and has its own rules, see [`pow`]. A `None`
//! operand fails every arithmetic operator.

use std::mem;

use dyn_value::limits::MAX_LEN;
use dyn_value::{strings, Dict, List, Value, ValueError, ValueResult, ValueType};

use crate::errors::{invalid_operand, invalid_operands, OpError, OpResult};
use crate::operators::{apply, apply_unary, BinaryOp, UnaryOp};

pub fn add(target: &mut Value, other: &Value) -> OpResult {
    apply(target, other, |t, o| arithmetic(t, o, BinaryOp::Add))
}

pub fn sub(target: &mut Value, other: &Value) -> OpResult {
    apply(target, other, |t, o| arithmetic(t, o, BinaryOp::Sub))
}

pub fn mul(target: &mut Value, other: &Value) -> OpResult {
    apply(target, other, |t, o| arithmetic(t, o, BinaryOp::Mul))
}

/// Integer division truncates toward zero and fails on a zero divisor.
/// Float division follows IEEE.
pub fn div(target: &mut Value, other: &Value) -> OpResult {
    apply(target, other, |t, o| arithmetic(t, o, BinaryOp::Div))
}

/// Remainder with the sign of the dividend.
pub fn modulo(target: &mut Value, other: &Value) -> OpResult {
    apply(target, other, |t, o| arithmetic(t, o, BinaryOp::Mod))
}

/// Exponentiation.
///
/// A float exponent uses [`fast_approx_pow`] on any numeric base. An `Int`
/// exponent applies to an `Int` or `Float` base: a positive one multiplies
/// out (`Int ** Int` stays integral), zero or negative ones divide the base
/// by itself and always give a float, so `Int ** 0` is `Float 1.0` and
/// `0 ** 0` is NaN. Every other pairing fails, bools included.
pub fn pow(target: &mut Value, other: &Value) -> OpResult {
    apply(target, other, |t, o| {
        let result = match (&*t, o) {
            (Value::Bool(_) | Value::Int(_) | Value::Float(_), Value::Float(exponent)) => {
                Value::Float(fast_approx_pow(t.to_float(), *exponent))
            }
            (Value::Int(base), Value::Int(exponent)) => match u32::try_from(*exponent) {
                Ok(positive) if positive > 0 => Value::Int(base.wrapping_pow(positive)),
                _ => Value::Float(reciprocal_chain(int_to_float(*base), *exponent)),
            },
            (Value::Float(base), Value::Int(exponent)) if *exponent > 0 => {
                Value::Float(base.powi(*exponent))
            }
            (Value::Float(base), Value::Int(exponent)) => {
                Value::Float(reciprocal_chain(*base, *exponent))
            }
            _ => return Err(invalid_operands(BinaryOp::Pow, t, o)),
        };
        *t = result;
        Ok(())
    })
}

/// `base` divided by itself `1 - exponent` times, for `exponent <= 0`.
fn reciprocal_chain(base: f32, exponent: i32) -> f32 {
    base / base.powi(exponent.saturating_neg().saturating_add(1))
}

/// Negation: logical for bools, arithmetic for numbers.
pub fn neg(target: &mut Value) -> OpResult {
    apply_unary(target, |t| {
        match t {
            Value::Bool(b) => *b = !*b,
            Value::Int(n) => *n = n.wrapping_neg(),
            Value::Float(f) => *f = -*f,
            other => return Err(invalid_operand(UnaryOp::Neg, other)),
        }
        Ok(())
    })
}

fn arithmetic(target: &mut Value, other: &Value, op: BinaryOp) -> OpResult {
    if target.is_none() || other.is_none() {
        return Err(invalid_operands(op, target, other));
    }
    match target.type_of().max(other.type_of()) {
        ValueType::Bool | ValueType::Int => integer(target, other, op),
        ValueType::Float => float(target, other, op),
        ValueType::Str => string(target, other, op),
        ValueType::List => list(target, other, op),
        ValueType::Set => set(target, other, op),
        ValueType::Dict => dict(target, other, op),
        _ => Err(invalid_operands(op, target, other)),
    }
}

fn integer(target: &mut Value, other: &Value, op: BinaryOp) -> OpResult {
    let (a, b) = (target.to_int(), other.to_int());
    let result = match op {
        BinaryOp::Add => a.wrapping_add(b),
        BinaryOp::Sub => a.wrapping_sub(b),
        BinaryOp::Mul => a.wrapping_mul(b),
        BinaryOp::Div if b == 0 => return Err(OpError::DivisionByZero),
        BinaryOp::Div => a.wrapping_div(b),
        BinaryOp::Mod if b == 0 => return Err(OpError::ModuloByZero),
        BinaryOp::Mod => a.wrapping_rem(b),
        _ => return Err(invalid_operands(op, target, other)),
    };
    target.set_int(result);
    Ok(())
}

fn float(target: &mut Value, other: &Value, op: BinaryOp) -> OpResult {
    let (a, b) = (target.to_float(), other.to_float());
    let result = match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => a / b,
        BinaryOp::Mod => a % b,
        _ => return Err(invalid_operands(op, target, other)),
    };
    target.set_float(result);
    Ok(())
}

fn string(target: &mut Value, other: &Value, op: BinaryOp) -> OpResult {
    match op {
        BinaryOp::Add => {
            let joined = strings::concat(&target.try_to_string()?, &other.try_to_string()?)?;
            *target = Value::Str(joined);
            Ok(())
        }
        BinaryOp::Mul => {
            let repeated = match (&*target, other) {
                (Value::Str(text), Value::Int(n)) | (Value::Int(n), Value::Str(text)) => {
                    strings::repeat(text, repeat_count(*n))?
                }
                _ => return Err(invalid_operands(op, target, other)),
            };
            *target = Value::Str(repeated);
            Ok(())
        }
        _ => Err(invalid_operands(op, target, other)),
    }
}

fn list(target: &mut Value, other: &Value, op: BinaryOp) -> OpResult {
    match op {
        BinaryOp::Add => {
            if let Value::List(left) = target {
                match other {
                    Value::List(right) => {
                        for item in right.iter() {
                            left.push(item)?;
                        }
                    }
                    item => {
                        left.push(item)?;
                    }
                }
                return Ok(());
            }
            if let Value::List(right) = other {
                let mut joined = right.deep_copy()?;
                joined.insert(0, mem::take(target))?;
                *target = Value::List(Box::new(joined));
                return Ok(());
            }
            Err(invalid_operands(op, target, other))
        }
        BinaryOp::Mul => {
            let repeated = match (&*target, other) {
                (Value::List(items), Value::Int(n)) | (Value::Int(n), Value::List(items)) => {
                    repeat_list(items, repeat_count(*n))?
                }
                _ => return Err(invalid_operands(op, target, other)),
            };
            *target = Value::List(Box::new(repeated));
            Ok(())
        }
        _ => Err(invalid_operands(op, target, other)),
    }
}

fn set(target: &mut Value, other: &Value, op: BinaryOp) -> OpResult {
    match op {
        BinaryOp::Add => {
            if let Value::Set(left) = target {
                match other {
                    Value::Set(right) => {
                        for item in right.iter() {
                            left.insert(item)?;
                        }
                    }
                    item => {
                        left.insert(item)?;
                    }
                }
                return Ok(());
            }
            if let Value::Set(right) = other {
                let mut union = right.deep_copy()?;
                union.insert_owned(mem::take(target))?;
                *target = Value::Set(Box::new(union));
                return Ok(());
            }
            Err(invalid_operands(op, target, other))
        }
        BinaryOp::Sub => {
            if let Value::Set(left) = target {
                match other {
                    Value::Set(right) => {
                        for item in right.iter() {
                            left.remove_value(item);
                        }
                    }
                    item => {
                        left.remove_value(item);
                    }
                }
                return Ok(());
            }
            if let Value::Set(right) = other {
                let mut difference = right.deep_copy()?;
                difference.remove_value(target);
                *target = Value::Set(Box::new(difference));
                return Ok(());
            }
            Err(invalid_operands(op, target, other))
        }
        _ => Err(invalid_operands(op, target, other)),
    }
}

/// `Dict + Dict` copies every right entry into the left, replacing values of
/// shared keys, then rebinds receivers to the left dict.
fn dict(target: &mut Value, other: &Value, op: BinaryOp) -> OpResult {
    let (BinaryOp::Add, Value::Dict(left), Value::Dict(right)) = (op, &*target, other) else {
        return Err(invalid_operands(op, target, other));
    };
    if left.ptr_eq(right) {
        return Ok(());
    }
    // Copy first: `right` may be borrowed from inside `left`.
    let entries = right
        .borrow()
        .iter()
        .map(|(key, value)| -> ValueResult<(String, Value)> {
            Ok((key.to_owned(), value.deep_copy()?))
        })
        .collect::<ValueResult<Vec<_>>>()?;
    {
        let mut merged = left.borrow_mut();
        for (key, value) in entries {
            merged.insert_owned(&key, value)?;
        }
    }
    Dict::set_location(left);
    Ok(())
}

/// Negative counts repeat zero times.
fn repeat_count(count: i32) -> usize {
    usize::try_from(count).unwrap_or(0)
}

/// `times` copies of `items` back to back.
///
/// Zero copies still commit room for one element.
fn repeat_list(items: &List, times: usize) -> ValueResult<List> {
    if times == 0 {
        return List::with_space(1);
    }
    let total = items
        .len()
        .checked_mul(times)
        .ok_or(ValueError::CapacityExceeded {
            requested: usize::MAX,
            limit: MAX_LEN,
        })?;
    let mut repeated = List::with_space(total)?;
    for _ in 0..times {
        for item in items {
            repeated.push(item)?;
        }
    }
    Ok(repeated)
}

#[allow(
    clippy::cast_precision_loss,
    reason = "Integer bases beyond 2^24 lose precision in any float power"
)]
fn int_to_float(n: i32) -> f32 {
    n as f32
}

/// Approximate `base` raised to `exponent` from the IEEE bit layout.
///
/// Computes `2^(exponent * log2(base))` with rational fits for both the
/// logarithm and the power of two. Relative error stays around 1e-4 for
/// positive finite bases; non-positive bases give meaningless results.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::excessive_precision,
    reason = "Bit-level approximation reinterprets integers as floats on purpose"
)]
pub fn fast_approx_pow(base: f32, exponent: f32) -> f32 {
    let bits = base.to_bits();
    let mantissa = f32::from_bits((bits & 0x007F_FFFF) | 0x3F00_0000);
    let log2 = bits as f32 * 1.192_092_9e-7
        - 124.225_52
        - 1.498_030_3 * mantissa
        - 1.725_88 / (0.352_088_7 + mantissa);

    let p = log2 * exponent;
    let offset = if p < 0.0 { 1.0 } else { 0.0 };
    let clipped = if p < -126.0 { -126.0 } else { p };
    let fraction = clipped - clipped as i32 as f32 + offset;
    let scaled = (1u32 << 23) as f32
        * (clipped + 121.274_06 + 27.728_023 / (4.842_525_7 - fraction)
            - 1.490_129_1 * fraction);
    f32::from_bits(scaled as u32)
}
