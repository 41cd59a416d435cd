/// Builds a [`TjsonValue`](crate::TjsonValue) from JSON-like syntax.
///
/// Object member names are literals: string literals become text names and
/// byte string literals become binary names. Any other value goes through
/// `TjsonValue::from`, so integer literals keep their Rust signedness.
///
/// ```rust
/// use serde_tjson::{encode, tjson};
///
/// let value = tjson!({ "n": 1u8, b"raw": [true, null] });
/// assert_eq!(encode(&value).unwrap(), r#"{"s:n":"u:1","b64:cmF3":[true,null]}"#);
/// ```
#[macro_export]
macro_rules! tjson {
    (null) => {
        $crate::TjsonValue::Null
    };

    (true) => {
        $crate::TjsonValue::Bool(true)
    };

    (false) => {
        $crate::TjsonValue::Bool(false)
    };

    ([]) => {
        $crate::TjsonValue::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::TjsonValue::Array(vec![$($crate::tjson!($elem)),*])
    };

    ({}) => {
        $crate::TjsonValue::Object($crate::TjsonMap::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::TjsonMap::new();
        $(
            object.insert($crate::Key::from($key), $crate::tjson!($value));
        )*
        $crate::TjsonValue::Object(object)
    }};

    ($e:expr) => {
        $crate::TjsonValue::from($e)
    };
}

#[cfg(test)]
mod tests {
    use crate::{Key, TjsonMap, TjsonValue};

    #[test]
    fn test_tjson_macro_primitives() {
        assert_eq!(tjson!(null), TjsonValue::Null);
        assert_eq!(tjson!(true), TjsonValue::Bool(true));
        assert_eq!(tjson!(42), TjsonValue::SignedInt(42));
        assert_eq!(tjson!(42u32), TjsonValue::UnsignedInt(42));
        assert_eq!(tjson!(3.5), TjsonValue::Float(3.5));
        assert_eq!(tjson!("hello"), TjsonValue::String("hello".to_string()));
    }

    #[test]
    fn test_tjson_macro_objects() {
        assert_eq!(tjson!({}), TjsonValue::Object(TjsonMap::new()));

        let obj = tjson!({
            "name": "Alice",
            b"id": 30u64,
        });

        match obj {
            TjsonValue::Object(map) => {
                assert_eq!(map.len(), 2);
                assert_eq!(map.get_text("name"), Some(&TjsonValue::from("Alice")));
                assert_eq!(map.get(&Key::from(b"id")), Some(&TjsonValue::UnsignedInt(30)));
            }
            _ => panic!("Expected object"),
        }
    }
}
