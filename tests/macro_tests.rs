use chrono::{TimeZone, Utc};
use serde_tjson::{encode, tjson, Key, TjsonMap, TjsonValue};

#[test]
fn test_tjson_macro_null() {
    let value = tjson!(null);
    assert_eq!(value, TjsonValue::Null);
}

#[test]
fn test_tjson_macro_booleans() {
    assert_eq!(tjson!(true), TjsonValue::Bool(true));
    assert_eq!(tjson!(false), TjsonValue::Bool(false));
}

#[test]
fn test_tjson_macro_numbers() {
    assert_eq!(tjson!(42), TjsonValue::SignedInt(42));
    assert_eq!(tjson!(-123), TjsonValue::SignedInt(-123));
    assert_eq!(tjson!(42u64), TjsonValue::UnsignedInt(42));
    assert_eq!(tjson!(3.5), TjsonValue::Float(3.5));
}

#[test]
fn test_tjson_macro_strings_and_bytes() {
    assert_eq!(tjson!("hello world"), TjsonValue::String("hello world".to_string()));
    assert_eq!(tjson!(""), TjsonValue::String(String::new()));
    assert_eq!(tjson!((vec![1u8, 2])), TjsonValue::Binary(vec![1, 2]));
}

#[test]
fn test_tjson_macro_arrays() {
    assert_eq!(tjson!([]), TjsonValue::Array(vec![]));

    let mixed = tjson!([1, "hello", true, null]);
    assert_eq!(
        mixed,
        TjsonValue::Array(vec![
            TjsonValue::SignedInt(1),
            TjsonValue::String("hello".to_string()),
            TjsonValue::Bool(true),
            TjsonValue::Null,
        ])
    );
}

#[test]
fn test_tjson_macro_objects() {
    assert_eq!(tjson!({}), TjsonValue::Object(TjsonMap::new()));

    let obj = tjson!({
        "name": "Alice",
        "age": 30u32,
        b"\x00raw": 1.5,
    });

    let map = obj.as_object().unwrap();
    assert_eq!(map.len(), 3);
    assert_eq!(map.get_text("name"), Some(&TjsonValue::from("Alice")));
    assert_eq!(map.get_text("age"), Some(&TjsonValue::UnsignedInt(30)));
    assert_eq!(map.get_binary(b"\x00raw"), Some(&TjsonValue::Float(1.5)));
}

#[test]
fn test_tjson_macro_nested() {
    let value = tjson!({
        "user": {
            "tags": ["a", "b"],
            "meta": {}
        },
        "count": 2u8
    });

    assert_eq!(
        encode(&value).unwrap(),
        r#"{"s:user":{"s:tags":["s:a","s:b"],"s:meta":{}},"s:count":"u:2"}"#
    );
}

#[test]
fn test_tjson_macro_expressions() {
    let stamp = Utc.with_ymd_and_hms(2016, 10, 2, 7, 31, 51).unwrap();
    let name = String::from("bob");
    let value = tjson!([stamp, name]);
    assert_eq!(
        encode(&value).unwrap(),
        r#"["t:2016-10-02T07:31:51Z","s:bob"]"#
    );
}

#[test]
fn test_tjson_value_methods() {
    let value = tjson!({ "n": 7u64, "s": "x" });
    let map = value.as_object().unwrap();

    assert!(value.is_object());
    assert_eq!(value.kind(), "object");
    assert_eq!(map.get_text("n").and_then(TjsonValue::as_u64), Some(7));
    assert_eq!(map.get_text("n").and_then(TjsonValue::as_i64), Some(7));
    assert_eq!(map.get_text("s").and_then(TjsonValue::as_str), Some("x"));
    assert_eq!(map.get(&Key::from("missing")), None);
}
