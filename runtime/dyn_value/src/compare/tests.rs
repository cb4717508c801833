use super::*;
use crate::function::{Function, RECEIVER_KEY};
use crate::list::List;
use crate::value::Slot;
use pretty_assertions::assert_eq;

fn ints(values: &[i32]) -> Value {
    Value::list(values.iter().copied().map(Value::int).collect()).unwrap()
}

fn int_set(values: &[i32]) -> Value {
    Value::set(values.iter().copied().map(Value::int).collect()).unwrap()
}

#[test]
fn none_orders_first() {
    assert_eq!(compare(&Value::None, &Value::None), Comparison::Equal);
    assert_eq!(compare(&Value::None, &Value::int(0)), Comparison::Less);
    assert_eq!(compare(&Value::string(""), &Value::None), Comparison::Greater);
}

#[test]
fn scalars_coerce_to_the_larger_type() {
    assert_eq!(compare(&Value::int(1), &Value::float(1.0)), Comparison::Equal);
    assert_eq!(compare(&Value::bool(true), &Value::int(2)), Comparison::Less);
    assert_eq!(compare(&Value::float(2.5), &Value::int(2)), Comparison::Greater);
    assert_eq!(compare(&Value::bool(true), &Value::bool(false)), Comparison::Greater);
    assert_eq!(
        compare(&Value::float(f32::NAN), &Value::float(f32::NAN)),
        Comparison::NotEqual
    );
}

#[test]
fn strings_compare_bytewise() {
    assert_eq!(compare(&Value::string("abc"), &Value::string("abd")), Comparison::Less);
    assert_eq!(compare(&Value::string("b"), &Value::string("abc")), Comparison::Greater);
    assert_eq!(compare(&Value::string("x"), &Value::string("x")), Comparison::Equal);
    assert_eq!(compare(&Value::string("1"), &Value::int(1)), Comparison::Incomparable);
}

#[test]
fn lists_compare_by_length_then_elements() {
    assert_eq!(compare(&ints(&[9]), &ints(&[1, 2])), Comparison::Less);
    assert_eq!(compare(&ints(&[1, 2, 3]), &ints(&[1, 2])), Comparison::Greater);
    assert_eq!(compare(&ints(&[1, 2]), &ints(&[1, 2])), Comparison::Equal);
    assert_eq!(compare(&ints(&[1, 3]), &ints(&[1, 2])), Comparison::Greater);
    let mixed = Value::list(vec![Value::int(1), Value::string("a")]).unwrap();
    assert_eq!(compare(&ints(&[1, 2]), &mixed), Comparison::Incomparable);
    assert_eq!(compare(&ints(&[1]), &int_set(&[1])), Comparison::Incomparable);
}

#[test]
fn sets_ignore_order() {
    assert_eq!(compare(&int_set(&[1, 2, 3]), &int_set(&[3, 1, 2])), Comparison::Equal);
    assert_eq!(compare(&int_set(&[1, 2]), &int_set(&[3, 2, 1])), Comparison::Less);
    assert_eq!(compare(&int_set(&[1, 2, 3]), &int_set(&[2])), Comparison::Greater);
    assert_eq!(compare(&int_set(&[1, 4]), &int_set(&[1, 2, 3])), Comparison::NotEqual);
    assert_eq!(compare(&int_set(&[1, 2]), &int_set(&[3, 4])), Comparison::NotEqual);
}

#[test]
fn dicts_compare_by_entries() {
    let a = Value::dict(vec![("a", Value::int(1)), ("b", Value::int(2))]).unwrap();
    let b = Value::dict(vec![("b", Value::float(2.0)), ("a", Value::int(1))]).unwrap();
    let c = Value::dict(vec![("a", Value::int(1))]).unwrap();
    assert_eq!(compare(&a, &b), Comparison::Equal);
    assert_eq!(compare(&a, &c), Comparison::NotEqual);
    assert_eq!(compare(&a, &a), Comparison::Equal);
}

fn noop(_: &mut List) -> crate::ValueResult<Value> {
    Ok(Value::None)
}

fn method(code: &[u8]) -> Value {
    let params = Value::dict(vec![(RECEIVER_KEY, Value::None)]).unwrap();
    Value::function(Function::new_procedure(&params, code, None).unwrap())
}

#[test]
fn functions_compare_by_code() {
    let f = Value::function(Function::new_procedure(&Value::None, &[1], None).unwrap());
    assert_eq!(compare(&f, &f.deep_copy().unwrap()), Comparison::Equal);
    assert_eq!(compare(&method(&[1]), &method(&[1])), Comparison::Equal);
    assert_eq!(compare(&method(&[1]), &method(&[2])), Comparison::NotEqual);
    assert_eq!(compare(&f, &method(&[1])), Comparison::NotEqual);

    let native = |tag| Value::function(Function::new_native(noop, tag, None).unwrap());
    assert_eq!(compare(&native(1), &native(1)), Comparison::Equal);
    assert_eq!(compare(&native(1), &native(2)), Comparison::NotEqual);
    assert_eq!(compare(&native(1), &f), Comparison::NotEqual);

    assert_eq!(compare(&Value::int(1), &f), Comparison::Incomparable);
    assert_eq!(compare(&Value::Misc, &Value::Misc), Comparison::Incomparable);
}

#[test]
fn objects_with_methods_equal_their_copies() {
    let object = Value::dict(vec![("m", method(&[7, 8])), ("n", Value::int(1))]).unwrap();
    let copy = object.deep_copy().unwrap();
    assert_eq!(compare(&copy, &object), Comparison::Equal);
    assert_eq!(compare(&object, &object), Comparison::Equal);

    let mut unbound = Value::dict(vec![("n", Value::int(1))]).unwrap();
    unbound
        .as_dict_mut()
        .unwrap()
        .insert_owned("m", method(&[7, 8]))
        .unwrap();
    assert_eq!(compare(&unbound, &object), Comparison::NotEqual);
}

#[test]
fn references_compare_as_their_targets() {
    let slot = Slot::new(Value::int(3));
    let alias = Value::reference_to(&slot);
    assert_eq!(compare(&alias, &Value::int(3)), Comparison::Equal);
    assert_eq!(compare(&Value::int(4), &alias), Comparison::Greater);
}

#[test]
fn search_positions_are_one_based() {
    let list = ints(&[5, 6, 7]);
    assert_eq!(search(&list, &Value::int(7)), 3);
    assert_eq!(search(&list, &Value::float(5.0)), 1);
    assert_eq!(search(&list, &Value::int(8)), 0);
    assert_eq!(search(&int_set(&[1, 2]), &Value::int(2)), 2);
    assert_eq!(search(&Value::string("abc"), &Value::string("a")), 0);
}

#[test]
fn dict_search_uses_rendered_key() {
    let dict = Value::dict(vec![("1", Value::None), ("name", Value::None)]).unwrap();
    assert_eq!(search(&dict, &Value::int(1)), 1);
    assert_eq!(search(&dict, &Value::string("name")), 2);
    assert_eq!(search(&dict, &Value::bool(false)), 0);
}

#[test]
fn container_detection() {
    assert!(is_container(&ints(&[])));
    assert!(is_container(&int_set(&[])));
    assert!(!is_container(&Value::string("abc")));
}
