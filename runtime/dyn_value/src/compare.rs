//! The comparison protocol and container search.
//!
//! [`compare`] is the single primitive behind the language's `==`, `!=`,
//! `<`, `<=`, `>` and `>=`, and behind set membership. It is total: every
//! pair of values yields one of five outcomes.

use std::cmp::Ordering;

use crate::dict::Dict;
use crate::function::{Callable, Function};
use crate::list::List;
use crate::set::Set;
use crate::stack::ensure_sufficient_stack;
use crate::strings;
use crate::value::{Heap, RefKind, Value, ValueType};

/// Outcome of comparing two values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Comparison {
    Equal,
    Less,
    Greater,
    /// Same type but unordered and different (sets, dicts, NaN).
    NotEqual,
    /// The types cannot be compared.
    Incomparable,
}

impl From<Ordering> for Comparison {
    fn from(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Less => Comparison::Less,
            Ordering::Equal => Comparison::Equal,
            Ordering::Greater => Comparison::Greater,
        }
    }
}

/// Compare two values, reading through references on either side.
///
/// - `None` equals `None` and is less than anything else.
/// - Bools, ints and floats compare numerically after coercion to the
///   larger of the two types.
/// - Strings, lists, sets and dicts compare only with their own type.
/// - Functions are `Equal` or `NotEqual` to other functions.
/// - Everything else is incomparable.
pub fn compare(left: &Value, right: &Value) -> Comparison {
    left.with_resolved(|l| right.with_resolved(|r| compare_resolved(l, r)))
}

fn compare_resolved(left: &Value, right: &Value) -> Comparison {
    match (left, right) {
        (Value::None, Value::None) => return Comparison::Equal,
        (Value::None, _) => return Comparison::Less,
        (_, Value::None) => return Comparison::Greater,
        _ => {}
    }
    ensure_sufficient_stack(|| match left.type_of().max(right.type_of()) {
        ValueType::Bool => left.to_bool().cmp(&right.to_bool()).into(),
        ValueType::Int => left.to_int().cmp(&right.to_int()).into(),
        ValueType::Float => left
            .to_float()
            .partial_cmp(&right.to_float())
            .map_or(Comparison::NotEqual, Comparison::from),
        _ => match (left, right) {
            (Value::Str(a), Value::Str(b)) => strings::compare(a, b).into(),
            (Value::List(a), Value::List(b)) => compare_lists(a, b),
            (Value::Set(a), Value::Set(b)) => compare_sets(a, b),
            (Value::Dict(a), Value::Dict(b)) => compare_dicts(a, b),
            (Value::Function(a), Value::Function(b)) => compare_functions(a, b),
            _ => Comparison::Incomparable,
        },
    })
}

/// Shorter is less; equal lengths take the first non-equal element outcome.
fn compare_lists(left: &List, right: &List) -> Comparison {
    match left.len().cmp(&right.len()) {
        Ordering::Equal => left
            .iter()
            .zip(right.iter())
            .map(|(a, b)| compare(a, b))
            .find(|outcome| *outcome != Comparison::Equal)
            .unwrap_or(Comparison::Equal),
        unequal => unequal.into(),
    }
}

/// Length decides the provisional outcome; a missing element makes it `NotEqual`.
fn compare_sets(left: &Set, right: &Set) -> Comparison {
    let (provisional, smaller, larger) = match left.len().cmp(&right.len()) {
        Ordering::Greater => (Comparison::Greater, right, left),
        ordering => (Comparison::from(ordering), left, right),
    };
    if smaller.iter().all(|item| larger.contains(item)) {
        provisional
    } else {
        Comparison::NotEqual
    }
}

/// Dicts are equal when they map the same keys to equal values.
fn compare_dicts(left: &Heap<Dict>, right: &Heap<Dict>) -> Comparison {
    if left.ptr_eq(right) {
        return Comparison::Equal;
    }
    let (left, right) = (left.borrow(), right.borrow());
    let same = left.len() == right.len()
        && left.iter().all(|(key, value)| {
            right
                .get(key)
                .is_some_and(|other| compare(value, other) == Comparison::Equal)
        });
    if same {
        Comparison::Equal
    } else {
        Comparison::NotEqual
    }
}

/// Functions are equal when they run the same code with equal parameters.
/// Receiver slots match when both are bound, whatever dict they point at.
fn compare_functions(left: &Function, right: &Function) -> Comparison {
    let same = match (left.callable(), right.callable()) {
        (Callable::Native { func: a, tag: ta }, Callable::Native { func: b, tag: tb }) => {
            *a as usize == *b as usize && ta == tb
        }
        (
            Callable::Procedure {
                params: pa,
                code: ca,
            },
            Callable::Procedure {
                params: pb,
                code: cb,
            },
        ) => ca == cb && same_params(pa, pb),
        _ => false,
    };
    if same {
        Comparison::Equal
    } else {
        Comparison::NotEqual
    }
}

fn same_params(left: &Value, right: &Value) -> bool {
    let (Value::Dict(left), Value::Dict(right)) = (left, right) else {
        return left.is_none() && right.is_none();
    };
    let (left, right) = (left.borrow(), right.borrow());
    left.len() == right.len()
        && left.iter().all(|(key, value)| {
            right.get(key).is_some_and(|other| {
                if is_bound(value) || is_bound(other) {
                    is_bound(value) && is_bound(other)
                } else {
                    equals(value, other)
                }
            })
        })
}

fn is_bound(value: &Value) -> bool {
    matches!(value, Value::Reference(reference) if reference.kind() == RefKind::Bound)
}

/// Language equality.
#[inline]
pub fn equals(left: &Value, right: &Value) -> bool {
    compare(left, right) == Comparison::Equal
}

/// 1-based position of the first element of `list` equal to `element`, or 0.
pub fn position(list: &List, element: &Value) -> usize {
    list.iter()
        .position(|item| equals(item, element))
        .map_or(0, |i| i + 1)
}

/// 1-based position of `element` in `container`, or 0.
///
/// Lists and sets scan for an equal element. Dicts look up the element's
/// rendering as a key. Any other container yields 0.
pub fn search(container: &Value, element: &Value) -> usize {
    container.with_resolved(|container| match container {
        Value::List(list) => position(list, element),
        Value::Set(set) => set.search(element),
        Value::Dict(dict) => dict.borrow().has_key(&element.to_string()),
        _ => 0,
    })
}

/// Whether `value` can be searched with [`search`].
pub fn is_container(value: &Value) -> bool {
    matches!(
        value.resolved_type(),
        ValueType::List | ValueType::Set | ValueType::Dict
    )
}

#[cfg(test)]
mod tests;
