//! Conversions between Value and serde_json::Value.

use crate::{Key, Value};

/// Convert serde_json::Value to our Value.
///
/// Objects become plain `Value::Map`s, ready to be merged into a store.
pub fn json_to_value(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                // Fallback for very large numbers
                Value::String(n.to_string())
            }
        }
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(arr) => Value::Array(arr.into_iter().map(json_to_value).collect()),
        serde_json::Value::Object(map) => Value::Map(
            map.into_iter()
                .map(|(k, v)| (Key::from(k), json_to_value(v)))
                .collect(),
        ),
    }
}

/// Convert our Value to serde_json::Value.
///
/// Namespaces are flattened into objects. Bytes become arrays of numbers;
/// non-finite floats and opaque values become `null`.
pub fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Integer(i) => serde_json::Value::Number((*i).into()),
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Bytes(b) => serde_json::Value::Array(
            b.iter()
                .map(|byte| serde_json::Value::Number((*byte).into()))
                .collect(),
        ),
        Value::Array(arr) => serde_json::Value::Array(arr.iter().map(value_to_json).collect()),
        Value::Map(map) => serde_json::Value::Object(
            map.iter()
                .map(|(k, v)| (k.to_string(), value_to_json(v)))
                .collect(),
        ),
        Value::Node(node) => value_to_json(&node.to_value()),
        Value::Opaque(_) => serde_json::Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{keypath, Node, Opaque};

    #[test]
    fn json_to_value_numbers() {
        let json = serde_json::json!({
            "integer": 42,
            "float": 2.75,
            "negative": -100,
            "huge": u64::MAX,
        });

        let value = json_to_value(json);
        match value {
            Value::Map(map) => {
                assert_eq!(map.get("integer"), Some(&Value::Integer(42)));
                assert_eq!(map.get("negative"), Some(&Value::Integer(-100)));
                if let Some(Value::Float(f)) = map.get("float") {
                    assert!((f - 2.75).abs() < 0.001);
                } else {
                    panic!("expected float");
                }
                assert!(matches!(map.get("huge"), Some(Value::Float(_))));
            }
            _ => panic!("expected map"),
        }
    }

    #[test]
    fn json_objects_become_maps() {
        let value = json_to_value(serde_json::json!({"a": {"b": [1, "two", null]}}));
        let a = value.as_map().unwrap().get("a").unwrap();
        assert!(a.is_map());
        assert_eq!(
            a.as_map().unwrap().get("b").unwrap(),
            &Value::Array(vec![Value::Integer(1), Value::from("two"), Value::Null])
        );
    }

    #[test]
    fn value_to_json_flattens_nodes() {
        let store = Node::new();
        store.set("one", 1);
        store.set_path(&keypath!("letters.a"), "A").unwrap();

        assert_eq!(
            value_to_json(&Value::Node(store)),
            serde_json::json!({"one": 1, "letters": {"a": "A"}})
        );
    }

    #[test]
    fn value_to_json_lossy_variants() {
        assert_eq!(value_to_json(&Value::Float(f64::NAN)), serde_json::Value::Null);
        assert_eq!(
            value_to_json(&Value::Opaque(Opaque::new(1u8))),
            serde_json::Value::Null
        );
        assert_eq!(
            value_to_json(&Value::Bytes(vec![1, 2])),
            serde_json::json!([1, 2])
        );
    }
}
