use super::*;
use crate::encode;
use dyn_value::{equals, ValueType};

fn ints(values: &[i32]) -> Value {
    Value::list(values.iter().copied().map(Value::int).collect()).unwrap()
}

mod round_trip {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn representative_values() {
        let values = vec![
            Value::None,
            Value::bool(true),
            Value::bool(false),
            Value::int(-1),
            Value::int(126),
            Value::int(127),
            Value::int(32766),
            Value::int(32767),
            Value::int(i32::MIN),
            Value::float(3.5),
            Value::string("abc"),
            ints(&[1, 2, 3]),
            Value::set(vec![Value::int(1), Value::int(2), Value::int(3)]).unwrap(),
            Value::dict(vec![("a", Value::int(1)), ("b", Value::int(2))]).unwrap(),
        ];
        for value in values {
            let decoded = decode(&encode(&value).unwrap()).unwrap();
            assert!(equals(&decoded, &value), "{value:?} came back as {decoded:?}");
            assert_eq!(decoded.type_of(), value.type_of());
        }
    }

    #[test]
    fn nested_structure_survives() {
        let value = Value::dict(vec![
            ("list", ints(&[1, 70_000])),
            ("set", Value::set(vec![Value::string("x")]).unwrap()),
            (
                "inner",
                Value::dict(vec![("f", Value::float(-0.25))]).unwrap(),
            ),
        ])
        .unwrap();
        let decoded = decode(&encode(&value).unwrap()).unwrap();
        assert_eq!(decoded.to_string(), value.to_string());
        assert!(equals(&decoded, &value));
    }
}

mod framing {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn prefix_reports_bytes_consumed() {
        let mut bytes = encode(&Value::int(1)).unwrap();
        bytes.extend(encode(&Value::string("x")).unwrap());
        let options = DecodeOptions::default();

        let (first, used) = decode_prefix(&bytes, &options).unwrap();
        assert_eq!((first, used), (Value::int(1), 3));
        let (second, used) = decode_prefix(&bytes[3..], &options).unwrap();
        assert_eq!((second, used), (Value::string("x"), 4));
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        assert_eq!(decode(&[3, 5, 12, 0xEE, 0xEE]), Ok(Value::int(5)));
    }

    #[test]
    fn missing_halt() {
        assert_eq!(decode(&[]), Err(CodecError::MissingHalt));
        assert_eq!(decode(&[0, 0]), Err(CodecError::MissingHalt));
    }

    #[test]
    fn halt_needs_exactly_one_value() {
        assert_eq!(decode(&[12]), Err(CodecError::ValueCount { found: 0 }));
        assert_eq!(decode(&[0, 1, 12]), Err(CodecError::ValueCount { found: 2 }));
    }
}

mod malformed {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn truncated_payloads() {
        assert_eq!(decode(&[3]), Err(CodecError::Truncated { offset: 0 }));
        assert_eq!(decode(&[0, 5, 1, 2]), Err(CodecError::Truncated { offset: 1 }));
        assert_eq!(decode(&[10, b'a']), Err(CodecError::Truncated { offset: 0 }));
        assert_eq!(decode(&[7, 0]), Err(CodecError::Truncated { offset: 0 }));
    }

    #[test]
    fn unknown_and_reserved_opcodes() {
        assert_eq!(
            decode(&[0, 13, 12]),
            Err(CodecError::UnknownOpcode {
                opcode: 13,
                offset: 1
            })
        );
        assert_eq!(
            decode(&[9, 12]),
            Err(CodecError::UnknownOpcode {
                opcode: 9,
                offset: 0
            })
        );
    }

    #[test]
    fn container_larger_than_the_stack() {
        assert_eq!(
            decode(&[0, 7, 2, 0, 12]),
            Err(CodecError::StackUnderflow {
                needed: 2,
                available: 1
            })
        );
    }

    #[test]
    fn invalid_utf8() {
        assert_eq!(
            decode(&[0, 10, 0xFF, 0, 12]),
            Err(CodecError::InvalidUtf8 { offset: 1 })
        );
    }

    #[test]
    fn dict_keys_must_be_strings() {
        assert_eq!(
            decode(&[3, 1, 3, 2, 11, 1, 0, 12]),
            Err(CodecError::InvalidKey { offset: 4 })
        );
    }

    #[test]
    fn pending_value_limit() {
        let options = DecodeOptions {
            max_values: 1,
            ..DecodeOptions::default()
        };
        assert_eq!(
            decode_with(&[0, 0, 12], &options),
            Err(CodecError::Value(ValueError::CapacityExceeded {
                requested: 2,
                limit: 1
            }))
        );
        assert_eq!(decode_with(&[0, 12], &options), Ok(Value::None));
    }

    /// `[0]` followed by `levels` single-element list units and `HALT`.
    fn nested_lists(levels: usize) -> Vec<u8> {
        let mut bytes = vec![0];
        for _ in 0..levels {
            bytes.extend([7, 1, 0]);
        }
        bytes.push(12);
        bytes
    }

    #[test]
    fn nesting_limit() {
        let options = DecodeOptions {
            max_depth: 2,
            ..DecodeOptions::default()
        };
        assert_eq!(
            decode_with(&nested_lists(2), &options).unwrap().to_string(),
            "[[None]]"
        );
        assert_eq!(
            decode_with(&nested_lists(3), &options),
            Err(CodecError::TooDeep {
                limit: 2,
                offset: 7
            })
        );
        assert_eq!(
            decode_with(&[10, b'k', 0, 0, 7, 1, 0, 11, 1, 0, 7, 1, 0, 12], &options),
            Err(CodecError::TooDeep {
                limit: 2,
                offset: 10
            })
        );
    }

    #[test]
    fn deeply_nested_input_is_rejected_before_it_is_built() {
        let limit = DecodeOptions::DEFAULT_MAX_DEPTH;
        assert!(decode(&nested_lists(limit)).is_ok());
        assert_eq!(
            decode(&nested_lists(1_000_000)),
            Err(CodecError::TooDeep {
                limit,
                offset: 1 + 3 * limit
            })
        );
    }
}

mod containers {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn set_drops_duplicates() {
        let decoded = decode(&[3, 1, 3, 1, 3, 2, 8, 3, 0, 12]).unwrap();
        assert_eq!(decoded.type_of(), ValueType::Set);
        assert_eq!(decoded.to_string(), "{1,2}");
    }

    #[test]
    fn dict_keeps_the_last_duplicate_key() {
        let decoded = decode(&[10, b'a', 0, 3, 1, 10, b'a', 0, 3, 2, 11, 2, 0, 12]).unwrap();
        assert_eq!(decoded.length(), 1);
        assert_eq!(decoded.to_string(), "{a:2}");
    }

    #[test]
    fn empty_containers() {
        assert_eq!(decode(&[7, 0, 0, 12]).unwrap().to_string(), "[]");
        assert_eq!(decode(&[8, 0, 0, 12]).unwrap().type_of(), ValueType::Set);
        assert_eq!(decode(&[11, 0, 0, 12]).unwrap().to_string(), "{}");
    }
}
