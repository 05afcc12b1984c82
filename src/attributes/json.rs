//! Conversions from loosely-typed JSON params into attribute values.
//!
//! This is where "is this a descriptor or a bare value" gets decided, so the
//! encoder itself only ever sees [AttributeValue].

use std::rc::Rc;

use itertools::Itertools;
use serde::de::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use tracing::debug;

use super::{AttributeValue, Attributes, AttributesInput, Scalar};

impl From<&Value> for Scalar {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Scalar::Null,
            Value::Bool(b) => Scalar::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Scalar::Int(i),
                None => Scalar::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Scalar::String(Rc::from(s.as_str())),
            Value::Array(_) | Value::Object(_) => Scalar::String(Rc::from(coerce_compound(value))),
        }
    }
}

/// Stringifies arrays and objects the way a browser coerces them: arrays
/// join their elements with commas, objects become `[object Object]`.
fn coerce_compound(value: &Value) -> String {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                Value::Array(_) | Value::Object(_) => coerce_compound(item),
                _ => Scalar::from(item).to_string(),
            })
            .join(","),
        Value::Object(_) => "[object Object]".to_owned(),
        _ => Scalar::from(value).to_string(),
    }
}

impl From<&Value> for AttributeValue {
    /// Objects with a `value` key are descriptors; `optional` only counts
    /// when it is literally `true`.
    fn from(value: &Value) -> Self {
        if let Value::Object(map) = value {
            if let Some(inner) = map.get("value") {
                return AttributeValue::Descriptor {
                    value: Scalar::from(inner),
                    optional: matches!(map.get("optional"), Some(Value::Bool(true))),
                };
            }
        }
        AttributeValue::Plain(Scalar::from(value))
    }
}

impl From<&Map<String, Value>> for Attributes {
    fn from(map: &Map<String, Value>) -> Self {
        map.iter()
            .map(|(name, value)| (name.as_str(), AttributeValue::from(value)))
            .collect()
    }
}

impl AttributesInput {
    /// Interprets a JSON `attributes` option. Strings are pre-formatted
    /// markup, objects are attribute maps, and anything else is ignored.
    pub fn from_json(value: &Value) -> Option<AttributesInput> {
        match value {
            Value::String(raw) => Some(AttributesInput::Raw(Rc::from(raw.as_str()))),
            Value::Object(map) => Some(AttributesInput::Structured(Attributes::from(map))),
            other => {
                debug!(?other, "ignoring attributes that are neither a map nor a string");
                None
            }
        }
    }
}

impl<'de> Deserialize<'de> for AttributesInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(AttributesInput::from_json(&value).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::encode_attributes;
    use serde_json::json;

    fn encode_json(value: Value) -> String {
        let input = AttributesInput::from_json(&value);
        encode_attributes(input.as_ref())
    }

    #[test]
    fn test_json_descriptors() {
        assert_eq!(
            encode_json(json!({
                "type": "radio",
                "checked": { "value": true, "optional": true },
            })),
            " type=\"radio\" checked"
        );
        assert_eq!(
            encode_json(json!({
                "type": "radio",
                "checked": { "value": false, "optional": true },
            })),
            " type=\"radio\""
        );
        assert_eq!(
            encode_json(json!({ "checked": { "value": "true", "optional": true } })),
            " checked=\"true\""
        );
    }

    #[test]
    fn test_json_falsy_optional_values() {
        assert_eq!(
            encode_json(json!({
                "example-falsy-1": { "value": "", "optional": true },
                "example-falsy-2": { "value": 0, "optional": true },
                "example-null": { "value": null, "optional": true },
            })),
            " example-falsy-1=\"\" example-falsy-2=\"0\""
        );
    }

    #[test]
    fn test_json_optional_must_be_boolean_true() {
        assert_eq!(
            encode_json(json!({ "checked": { "value": true, "optional": "yes" } })),
            " checked=\"true\""
        );
        assert_eq!(
            encode_json(json!({ "checked": { "value": null } })),
            " checked=\"\""
        );
    }

    #[test]
    fn test_json_preserves_insertion_order() {
        assert_eq!(
            encode_json(json!({ "zeta": "z", "alpha": "a", "mu": "m" })),
            " zeta=\"z\" alpha=\"a\" mu=\"m\""
        );
    }

    #[test]
    fn test_json_scalars() {
        assert_eq!(
            encode_json(json!({ "a": 1, "b": 2.5, "c": true, "d": null })),
            " a=\"1\" b=\"2.5\" c=\"true\" d=\"\""
        );
    }

    #[test]
    fn test_json_compound_values() {
        assert_eq!(
            encode_json(json!({ "a": [1, null, "x"], "b": { "nested": 1 } })),
            " a=\"1,,x\" b=\"[object Object]\""
        );
    }

    #[test]
    fn test_json_non_map_input_is_ignored() {
        assert_eq!(AttributesInput::from_json(&json!(42)), None);
        assert_eq!(AttributesInput::from_json(&json!(null)), None);
        assert_eq!(AttributesInput::from_json(&json!([1, 2])), None);
        assert_eq!(encode_json(json!(true)), "");
        assert_eq!(encode_json(json!({})), "");
    }

    #[test]
    fn test_json_string_passes_through() {
        assert_eq!(
            encode_json(json!(" data-x=\"y\"")),
            " data-x=\"y\""
        );
    }

    #[test]
    fn test_deserialize_is_permissive() {
        let input: AttributesInput = serde_json::from_str("[1, 2, 3]").unwrap();
        assert_eq!(input.encode(), "");
        let input: AttributesInput = serde_json::from_str(r#"{"id": "x"}"#).unwrap();
        assert_eq!(input.encode(), " id=\"x\"");
    }
}
