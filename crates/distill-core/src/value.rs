//! Helpers for reading loosely-typed JSON attributes.
//!
//! Design-tool exports make no promises about field types, so every reader
//! here returns `Option` and never panics on a surprising shape.

use serde_json::{Map, Value};

/// Attribute map of a single node.
pub type Attributes = Map<String, Value>;

/// Name of a JSON value's type, for log messages.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Loose truthiness: null, false, zero and empty containers are false.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Whether an attribute is present and truthy.
pub fn attr_truthy(attrs: &Attributes, key: &str) -> bool {
    attrs.get(key).is_some_and(is_truthy)
}

/// Read a string attribute.
pub fn str_attr<'a>(attrs: &'a Attributes, key: &str) -> Option<&'a str> {
    attrs.get(key).and_then(Value::as_str)
}

/// Read a numeric attribute.
pub fn num_attr(attrs: &Attributes, key: &str) -> Option<f64> {
    attrs.get(key).and_then(Value::as_f64)
}

/// Read an object attribute.
pub fn obj_attr<'a>(attrs: &'a Attributes, key: &str) -> Option<&'a Attributes> {
    attrs.get(key).and_then(Value::as_object)
}

/// Length of the compact JSON serialization of a value.
///
/// Walks the value with an explicit stack, so arbitrarily deep input is
/// measured without recursion.
pub fn serialized_len(value: &Value) -> usize {
    let leaf_len = |leaf: &Value| serde_json::to_string(leaf).map_or(0, |s| s.len());
    let mut total = 0;
    let mut pending = vec![value];

    while let Some(current) = pending.pop() {
        match current {
            Value::Object(map) => {
                // braces, commas, and one colon per entry
                total += 2 + map.len().saturating_sub(1) + map.len();
                for (key, item) in map {
                    total += leaf_len(&Value::String(key.clone()));
                    pending.push(item);
                }
            }
            Value::Array(items) => {
                total += 2 + items.len().saturating_sub(1);
                pending.extend(items.iter());
            }
            leaf => total += leaf_len(leaf),
        }
    }

    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!([])));
        assert!(!is_truthy(&json!({})));
        assert!(is_truthy(&json!(0.5)));
        assert!(is_truthy(&json!("rgb(0,0,0)")));
        assert!(is_truthy(&json!([{}])));
    }

    #[test]
    fn test_attribute_readers() {
        let value = json!({"name": "Card", "cornerRadius": 8, "layoutMode": null});
        let attrs = value.as_object().unwrap();
        assert_eq!(str_attr(attrs, "name"), Some("Card"));
        assert_eq!(num_attr(attrs, "cornerRadius"), Some(8.0));
        assert_eq!(str_attr(attrs, "cornerRadius"), None);
        assert!(!attr_truthy(attrs, "layoutMode"));
        assert!(!attr_truthy(attrs, "missing"));
    }

    #[test]
    fn test_serialized_len() {
        assert_eq!(serialized_len(&json!({"a": 1})), 7);

        let nested = json!({
            "id": "1:2",
            "fills": [{"type": "SOLID", "color": {"r": 0.5}}, null, true],
            "name": "quote \" inside",
            "children": []
        });
        let expected = serde_json::to_string(&nested).unwrap().len();
        assert_eq!(serialized_len(&nested), expected);
    }
}
