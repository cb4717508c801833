use super::*;
use pretty_assertions::assert_eq;

#[test]
fn insert_keeps_elements_unique() {
    let mut set = Set::with_space(0).unwrap();
    assert!(set.insert(&Value::int(1)).unwrap());
    assert!(set.insert(&Value::string("a")).unwrap());
    assert!(!set.insert(&Value::int(1)).unwrap());
    assert_eq!(set.len(), 2);
}

#[test]
fn uniqueness_uses_language_equality() {
    let mut set = Set::with_space(2).unwrap();
    set.insert_owned(Value::int(1)).unwrap();
    assert!(!set.insert_owned(Value::float(1.0)).unwrap());
    assert!(!set.insert_owned(Value::bool(true)).unwrap());
    assert_eq!(set.len(), 1);
}

#[test]
fn nested_containers_compare_by_value() {
    let mut set = Set::with_space(2).unwrap();
    let pair = || Value::list(vec![Value::int(1), Value::int(2)]).unwrap();
    set.insert_owned(pair()).unwrap();
    assert!(set.contains(&pair()));
    assert!(!set.insert_owned(pair()).unwrap());
}

#[test]
fn search_is_one_based() {
    let mut set = Set::with_space(2).unwrap();
    set.insert_owned(Value::string("a")).unwrap();
    set.insert_owned(Value::string("b")).unwrap();
    assert_eq!(set.search(&Value::string("b")), 2);
    assert_eq!(set.search(&Value::string("c")), 0);
}

#[test]
fn remove_value_keeps_order() {
    let mut set = Set::with_space(3).unwrap();
    for i in 1..=3 {
        set.insert_owned(Value::int(i)).unwrap();
    }
    assert_eq!(set.remove_value(&Value::int(2)), Some(Value::int(2)));
    assert_eq!(set.remove_value(&Value::int(2)), None);
    assert_eq!(set.as_slice(), &[Value::int(1), Value::int(3)][..]);
}
