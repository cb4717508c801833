//! Kleene three-valued logic.
//!
//! Operands are read as [`Trilean`]s: `None` and functions are unknown,
//! everything else is true or false by its truthiness. An unknown result is
//! stored as `None`. These operators never fail.

use dyn_value::{Trilean, Value};

use crate::errors::OpResult;

pub fn and(target: &mut Value, other: &Value) -> OpResult {
    logic(target, other, kleene_and)
}

pub fn or(target: &mut Value, other: &Value) -> OpResult {
    logic(target, other, kleene_or)
}

pub fn xor(target: &mut Value, other: &Value) -> OpResult {
    logic(target, other, kleene_xor)
}

pub fn not(target: &mut Value) -> OpResult {
    let result = kleene_not(target.to_bool3());
    store(target, result);
    Ok(())
}

fn logic(target: &mut Value, other: &Value, table: fn(Trilean, Trilean) -> Trilean) -> OpResult {
    let result = table(target.to_bool3(), other.to_bool3());
    store(target, result);
    Ok(())
}

fn store(target: &mut Value, truth: Trilean) {
    match truth {
        Trilean::True => target.set_bool(true),
        Trilean::False => target.set_bool(false),
        Trilean::Unknown => target.set_none(),
    }
}

/// False dominates; otherwise unknown dominates.
pub fn kleene_and(left: Trilean, right: Trilean) -> Trilean {
    match (left, right) {
        (Trilean::False, _) | (_, Trilean::False) => Trilean::False,
        (Trilean::True, Trilean::True) => Trilean::True,
        _ => Trilean::Unknown,
    }
}

/// True dominates; otherwise unknown dominates.
pub fn kleene_or(left: Trilean, right: Trilean) -> Trilean {
    match (left, right) {
        (Trilean::True, _) | (_, Trilean::True) => Trilean::True,
        (Trilean::False, Trilean::False) => Trilean::False,
        _ => Trilean::Unknown,
    }
}

/// Unknown whenever either side is unknown.
pub fn kleene_xor(left: Trilean, right: Trilean) -> Trilean {
    match (left, right) {
        (Trilean::Unknown, _) | (_, Trilean::Unknown) => Trilean::Unknown,
        (left, right) => Trilean::from(left != right),
    }
}

pub fn kleene_not(truth: Trilean) -> Trilean {
    match truth {
        Trilean::True => Trilean::False,
        Trilean::False => Trilean::True,
        Trilean::Unknown => Trilean::Unknown,
    }
}
