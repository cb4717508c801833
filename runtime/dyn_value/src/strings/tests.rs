use super::*;
use crate::errors::ValueError;
use crate::limits::MAX_STR_LEN;
use pretty_assertions::assert_eq;

#[test]
fn int_len_matches_decimal_rendering() {
    for value in [0, 7, -7, 10, 99, -100, 12_345, i32::MAX, i32::MIN] {
        assert_eq!(int_len(value), value.to_string().len(), "{value}");
    }
}

#[test]
fn float_len_matches_write_float() {
    for value in [0.0f32, 3.5, -22.222, 33.33, 1.0e9, f32::INFINITY, f32::NAN] {
        let mut text = String::new();
        write_float(&mut text, value).unwrap();
        assert_eq!(float_len(value), text.len(), "{value}");
    }
}

#[test]
fn floats_render_with_six_digits() {
    let mut text = String::new();
    write_float(&mut text, 3.5).unwrap();
    assert_eq!(text, "3.500000");
}

#[test]
fn compare_is_bytewise() {
    assert_eq!(compare("abc", "abd"), Ordering::Less);
    assert_eq!(compare("b", "abc"), Ordering::Greater);
    assert_eq!(compare("", ""), Ordering::Equal);
    assert_eq!(compare("Z", "a"), Ordering::Less);
}

#[test]
fn concat_and_repeat() {
    assert_eq!(concat("22", "12").unwrap(), "2212");
    assert_eq!(repeat("abc", 3).unwrap(), "abcabcabc");
    assert_eq!(repeat("abc", 0).unwrap(), "");
}

#[test]
fn built_strings_are_bounded() {
    assert_eq!(
        repeat("abc", i32::MAX as usize),
        Err(ValueError::StringTooLong {
            requested: 3 * i32::MAX as usize,
            limit: MAX_STR_LEN
        })
    );
    assert_eq!(repeat("ab", usize::MAX).unwrap_err(), ValueError::StringTooLong {
        requested: usize::MAX,
        limit: MAX_STR_LEN
    });
    assert_eq!(repeat("a", MAX_STR_LEN).map(|s| s.len()), Ok(MAX_STR_LEN));
    let half = "x".repeat(MAX_STR_LEN / 2 + 1);
    assert!(concat(&half, &half).is_err());
}
