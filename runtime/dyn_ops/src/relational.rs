//! Comparison and membership operators.
//!
//! All of them read through references on both sides and leave a `Bool` in
//! the target. Equality never fails. Ordering fails when [`compare`] reports
//! the operands incomparable; a `NotEqual` outcome orders as `false`.

use dyn_value::{compare, is_container, search, Comparison, Value};

use crate::errors::{incomparable, invalid_operands, OpResult};
use crate::operators::BinaryOp;

pub fn eq(target: &mut Value, other: &Value) -> OpResult {
    let outcome = compare(target, other);
    target.set_bool(outcome == Comparison::Equal);
    Ok(())
}

pub fn ne(target: &mut Value, other: &Value) -> OpResult {
    let outcome = compare(target, other);
    target.set_bool(outcome != Comparison::Equal);
    Ok(())
}

pub fn lt(target: &mut Value, other: &Value) -> OpResult {
    ordered(target, other, BinaryOp::Lt, Comparison::Less, false)
}

pub fn gt(target: &mut Value, other: &Value) -> OpResult {
    ordered(target, other, BinaryOp::Gt, Comparison::Greater, false)
}

/// Negation of [`gt`], so `NotEqual` operands satisfy it.
pub fn le(target: &mut Value, other: &Value) -> OpResult {
    ordered(target, other, BinaryOp::LtEq, Comparison::Greater, true)
}

/// Negation of [`lt`].
pub fn ge(target: &mut Value, other: &Value) -> OpResult {
    ordered(target, other, BinaryOp::GtEq, Comparison::Less, true)
}

fn ordered(
    target: &mut Value,
    other: &Value,
    op: BinaryOp,
    wanted: Comparison,
    negate: bool,
) -> OpResult {
    match compare(target, other) {
        Comparison::Incomparable => {
            let err = incomparable(op, target, other);
            target.set_none();
            Err(err)
        }
        outcome => {
            target.set_bool((outcome == wanted) != negate);
            Ok(())
        }
    }
}

/// Membership: whether `target` occurs in the list, set or dict `container`.
///
/// Dicts test the rendering of `target` as a key.
pub fn contained_in(target: &mut Value, container: &Value) -> OpResult {
    if !is_container(container) {
        let err = invalid_operands(BinaryOp::In, target, container);
        target.set_none();
        return Err(err);
    }
    let found = search(container, target) != 0;
    target.set_bool(found);
    Ok(())
}
