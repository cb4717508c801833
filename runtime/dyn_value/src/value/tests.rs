use super::*;
use crate::compare::equals;
use crate::RECEIVER_KEY;
use pretty_assertions::assert_eq;

fn ints(values: &[i32]) -> Value {
    Value::list(values.iter().copied().map(Value::int).collect()).unwrap()
}

fn receiver_of(object: &Value, key: &str) -> Option<Reference> {
    let dict = object.as_dict()?;
    let function = dict.get(key)?.as_function()?;
    let params = function.params()?.as_dict()?;
    params.get(RECEIVER_KEY)?.as_reference().cloned()
}

fn method() -> Value {
    let params = Value::dict(vec![(RECEIVER_KEY, Value::None), ("x", Value::int(0))]).unwrap();
    Value::function(Function::new_procedure(&params, &[1, 2, 3], Some("method")).unwrap())
}

#[test]
fn test_type_of() {
    assert_eq!(Value::None.type_of(), ValueType::None);
    assert_eq!(Value::bool(true).type_of(), ValueType::Bool);
    assert_eq!(Value::int(1).type_of(), ValueType::Int);
    assert_eq!(Value::float(1.0).type_of(), ValueType::Float);
    assert_eq!(Value::string("a").type_of(), ValueType::Str);
    assert_eq!(ints(&[]).type_of(), ValueType::List);
    assert_eq!(Value::set(vec![]).unwrap().type_of(), ValueType::Set);
    assert_eq!(Value::dict::<&str>(vec![]).unwrap().type_of(), ValueType::Dict);
    assert_eq!(Value::Misc.type_of(), ValueType::Misc);
}

#[test]
fn test_type_order() {
    assert!(ValueType::None < ValueType::Bool);
    assert!(ValueType::Bool < ValueType::Int);
    assert!(ValueType::Int < ValueType::Float);
    assert!(ValueType::Float < ValueType::Str);
    assert!(ValueType::Str < ValueType::List);
    assert!(ValueType::List < ValueType::Set);
    assert!(ValueType::Set < ValueType::Dict);
    assert!(ValueType::Dict < ValueType::Function);
}

#[test]
fn test_setters_replace_payload() {
    let mut slot = ints(&[1, 2, 3]);
    slot.set_string("hello").unwrap();
    assert_eq!(slot, Value::string("hello"));
    slot.set_int(4);
    assert_eq!(slot, Value::int(4));
    slot.set_list(3).unwrap();
    assert_eq!(slot.as_list().map(List::space), Some(3));
    slot.set_dict(2).unwrap();
    assert_eq!(slot.as_dict().map(|d| d.space()), Some(2));
    slot.set_none();
    assert!(slot.is_none());
}

#[test]
fn test_copy_is_independent() {
    let original = Value::dict(vec![
        ("name", Value::string("abc")),
        ("items", ints(&[1, 2])),
    ])
    .unwrap();
    let mut copy = original.deep_copy().unwrap();
    assert!(equals(&original, &copy));

    copy.as_dict_mut()
        .unwrap()
        .get_mut("items")
        .and_then(Value::as_list_mut)
        .unwrap()
        .push(&Value::int(3))
        .unwrap();
    assert_eq!(original.as_dict().unwrap().get("items"), Some(&ints(&[1, 2])));
    assert!(!equals(&original, &copy));
}

#[test]
fn test_copy_of_reference_copies_target() {
    let slot = Slot::new(Value::string("shared"));
    let alias = Value::reference_to(&slot);
    let copy = alias.deep_copy().unwrap();
    assert_eq!(copy.type_of(), ValueType::Str);
    slot.borrow_mut().set_int(1);
    assert_eq!(copy, Value::string("shared"));
}

#[test]
fn test_move_leaves_none() {
    let mut src = ints(&[1, 2, 3]);
    let mut dst = Value::int(9);
    dst.move_from(&mut src).unwrap();
    assert!(src.is_none());
    assert_eq!(dst, ints(&[1, 2, 3]));
}

#[test]
fn test_move_of_reference_copies_target() {
    let slot = Slot::new(Value::int(5));
    let mut src = Value::reference_to(&slot);
    let mut dst = Value::None;
    dst.move_from(&mut src).unwrap();
    assert!(src.is_none());
    assert_eq!(dst, Value::int(5));
    assert_eq!(*slot.borrow(), Value::int(5));
}

#[test]
fn test_copy_from_replaces_previous_payload() {
    let mut dst = Value::int(1);
    dst.copy_from(&Value::string("x")).unwrap();
    assert_eq!(dst, Value::string("x"));
}

#[test]
fn test_coercion_table() {
    assert!(Value::bool(true).to_bool());
    assert!(Value::int(-1).to_bool());
    assert!(!Value::float(0.0).to_bool());
    assert!(Value::string("a").to_bool());
    assert!(!Value::string("").to_bool());
    assert!(!ints(&[]).to_bool());
    assert!(ints(&[0]).to_bool());
    assert!(!Value::None.to_bool());
    assert!(!Value::Misc.to_bool());
    assert!(!method().to_bool());

    assert_eq!(Value::bool(true).to_int(), 1);
    assert_eq!(Value::float(-2.9).to_int(), -2);
    assert_eq!(Value::string("12").to_int(), 0);
    assert_eq!(Value::int(3).to_float(), 3.0);
    assert_eq!(Value::bool(true).to_float(), 1.0);
    assert_eq!(ints(&[1]).to_float(), 0.0);
}

#[test]
fn test_to_bool3() {
    assert_eq!(Value::None.to_bool3(), Trilean::Unknown);
    assert_eq!(method().to_bool3(), Trilean::Unknown);
    assert_eq!(Value::int(0).to_bool3(), Trilean::False);
    assert_eq!(Value::string("x").to_bool3(), Trilean::True);
    assert_eq!(Value::Misc.to_bool3(), Trilean::False);
}

#[test]
fn test_render() {
    assert_eq!(Value::None.to_string(), "$");
    assert_eq!(Value::bool(true).to_string(), "1");
    assert_eq!(Value::bool(false).to_string(), "0");
    assert_eq!(Value::int(-22).to_string(), "-22");
    assert_eq!(Value::float(3.5).to_string(), "3.500000");
    assert_eq!(Value::string("abc").to_string(), "abc");
    assert_eq!(method().to_string(), "FCT");
    assert_eq!(Value::external(&5u8).to_string(), "ex");

    let nested = Value::list(vec![
        Value::int(1),
        Value::float(2.5),
        Value::string("x"),
        Value::set(vec![Value::int(1), Value::int(2)]).unwrap(),
        Value::dict(vec![("a", Value::int(1)), ("b", ints(&[]))]).unwrap(),
        Value::None,
    ])
    .unwrap();
    assert_eq!(nested.to_string(), "[1,2.500000,x,{1,2},{a:1,b:[]},$]");
    assert_eq!(Value::dict::<&str>(vec![]).unwrap().to_string(), "{}");
}

#[test]
fn test_rendered_len_matches_render() {
    let samples = vec![
        Value::None,
        Value::bool(true),
        Value::int(i32::MIN),
        Value::float(-33.33),
        Value::string("hello"),
        ints(&[]),
        ints(&[1, -20, 300]),
        Value::set(vec![Value::string("a"), Value::float(1.5)]).unwrap(),
        Value::dict(vec![("key", ints(&[1])), ("", Value::None)]).unwrap(),
        method(),
    ];
    for value in &samples {
        let text = value.try_to_string().unwrap();
        assert_eq!(value.rendered_len(), text.len(), "{text}");
        assert_eq!(text, value.to_string());
    }
}

#[test]
fn test_length() {
    assert_eq!(Value::string("abcd").length(), 4);
    assert_eq!(ints(&[1, 2]).length(), 2);
    assert_eq!(Value::dict(vec![("a", Value::None)]).unwrap().length(), 1);
    assert_eq!(Value::int(7).length(), 0);
}

#[test]
fn test_byte_size() {
    let base = std::mem::size_of::<Value>();
    assert_eq!(Value::int(1).byte_size(), base);
    assert_eq!(Value::string("abc").byte_size(), base + 4);
    let small = ints(&[1]);
    let large = ints(&[1, 2, 3]);
    assert!(large.byte_size() > small.byte_size());
    let mut spare = Value::None;
    spare.set_list(10).unwrap();
    assert!(spare.byte_size() >= base + 10 * base);
}

#[test]
fn test_procedures_bind_to_enclosing_dict() {
    let object = Value::dict(vec![("name", Value::string("obj")), ("run", method())]).unwrap();
    let receiver = receiver_of(&object, "run").unwrap();
    assert_eq!(receiver.kind(), RefKind::Bound);
    assert!(receiver.points_to(object.dict_heap().unwrap()));
    assert_eq!(receiver.read(Value::length), 2);
}

#[test]
fn test_copy_rebinds_receivers() {
    let object = Value::dict(vec![("run", method())]).unwrap();
    let copy = object.deep_copy().unwrap();
    let receiver = receiver_of(&copy, "run").unwrap();
    assert!(receiver.points_to(copy.dict_heap().unwrap()));
    assert!(!receiver.points_to(object.dict_heap().unwrap()));
}

#[test]
fn test_nested_dicts_bind_their_own_methods() {
    let inner = Value::dict(vec![("run", method())]).unwrap();
    let outer = Value::dict(vec![("inner", inner), ("run", method())]).unwrap();
    let outer_dict = outer.as_dict().unwrap();
    let inner = outer_dict.get("inner").unwrap();
    let receiver = receiver_of(inner, "run").unwrap();
    assert!(receiver.points_to(inner.dict_heap().unwrap()));
    let receiver = receiver_of(&outer, "run").unwrap();
    assert!(receiver.points_to(outer.dict_heap().unwrap()));
}

#[test]
fn test_expect_type() {
    assert!(Value::int(1).expect_type(ValueType::Int).is_ok());
    assert_eq!(
        Value::int(1).expect_type(ValueType::Str),
        Err(ValueError::TypeMismatch {
            expected: ValueType::Str,
            found: ValueType::Int,
        })
    );
}
