//! Operator tests, grouped by operator family.


use dyn_value::Value;

pub(crate) fn ints(values: &[i32]) -> Value {
    Value::list(values.iter().copied().map(Value::int).collect()).unwrap()
}

pub(crate) fn int_set(values: &[i32]) -> Value {
    Value::set(values.iter().copied().map(Value::int).collect()).unwrap()
}
