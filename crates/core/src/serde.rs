//! Serde helper functions for the CRM's loosely typed JSON.
//!
//! The mobile API is backed by several CRM integrations. Ids arrive as strings
//! or numbers, and optional text arrives as empty strings, `null`, or not at all.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize optional text, treating empty strings as None.
/// Numbers (phone numbers stored as integers) are rendered as text; other
/// non-string values become None instead of failing the whole record.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => (!s.trim().is_empty()).then_some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Deserialize an id that may be a JSON string or number.
/// Empty strings, `null`, booleans and compound values become None.
pub fn deserialize_loose_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(value.and_then(|v| loose_id(&v)))
}

/// Renders a JSON scalar as an id string.
pub fn loose_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct TestStruct {
        #[serde(default, deserialize_with = "deserialize_optional_string")]
        string_field: Option<String>,
        #[serde(default, deserialize_with = "deserialize_loose_id")]
        id: Option<String>,
    }

    #[test]
    fn test_deserialize_optional_string_empty() {
        let json = r#"{"string_field": ""}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.string_field, None);
    }

    #[test]
    fn test_deserialize_optional_string_whitespace() {
        let json = r#"{"string_field": "   "}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.string_field, None);
    }

    #[test]
    fn test_deserialize_optional_string_value() {
        let json = r#"{"string_field": "hello"}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.string_field, Some("hello".to_string()));
    }

    #[test]
    fn test_deserialize_optional_string_null() {
        let json = r#"{"string_field": null}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.string_field, None);
    }

    #[test]
    fn test_deserialize_optional_string_number() {
        let json = r#"{"string_field": 3331234567}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.string_field, Some("3331234567".to_string()));
    }

    #[test]
    fn test_deserialize_optional_string_non_scalar() {
        let result: TestStruct = serde_json::from_str(r#"{"string_field": true}"#).unwrap();
        assert_eq!(result.string_field, None);

        let result: TestStruct = serde_json::from_str(r#"{"string_field": [1]}"#).unwrap();
        assert_eq!(result.string_field, None);
    }

    #[test]
    fn test_deserialize_loose_id_number() {
        let json = r#"{"id": 55}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.id, Some("55".to_string()));
    }

    #[test]
    fn test_deserialize_loose_id_string() {
        let json = r#"{"id": " 19x7 "}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.id, Some("19x7".to_string()));
    }

    #[test]
    fn test_deserialize_loose_id_empty_or_missing() {
        let result: TestStruct = serde_json::from_str(r#"{"id": ""}"#).unwrap();
        assert_eq!(result.id, None);

        let result: TestStruct = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(result.id, None);

        let result: TestStruct = serde_json::from_str(r#"{"id": false}"#).unwrap();
        assert_eq!(result.id, None);
    }
}
