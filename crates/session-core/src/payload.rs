//! Session payload projection and wire codec
//!
//! Records are stored as JSON objects. Integers that JSON consumers cannot
//! hold exactly (magnitude above 2^53 - 1) are written as decimal strings.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use session_shared::constants::SESSION_ID_FIELD;

use crate::error::SessionError;
use crate::repositories::StoredValue;

/// Largest integer an IEEE-754 double represents exactly
pub const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

/// Ordered allow-list of user fields kept in the session. Always contains `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadFields(Vec<String>);

impl PayloadFields {
    pub fn new<I, S>(fields: I) -> Result<Self, SessionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        if !fields.iter().any(|f| f == SESSION_ID_FIELD) {
            return Err(SessionError::MissingIdField);
        }
        Ok(Self(fields))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Keeps only allowed keys. Missing keys are skipped, not errors.
    pub fn project(&self, mut record: Map<String, Value>) -> Map<String, Value> {
        self.0
            .iter()
            .filter_map(|field| record.remove(field).map(|value| (field.clone(), value)))
            .collect()
    }
}

/// Serializes `user` and keeps the configured fields.
pub fn project_user<U: Serialize + ?Sized>(
    user: &U,
    fields: &PayloadFields,
) -> Result<Map<String, Value>, SessionError> {
    match serde_json::to_value(user)? {
        Value::Object(map) => Ok(fields.project(map)),
        other => Err(SessionError::InvalidPayload(format!(
            "expected an object, got {}",
            kind_of(&other)
        ))),
    }
}

pub fn encode_record(record: Map<String, Value>) -> Result<String, SessionError> {
    let value = stringify_wide_integers(Value::Object(record));
    Ok(serde_json::to_string(&value)?)
}

/// Parses text from the store; already-decoded JSON passes through.
pub fn decode_record(stored: StoredValue) -> Result<Map<String, Value>, SessionError> {
    let value = match stored {
        StoredValue::Text(text) => serde_json::from_str(&text)?,
        StoredValue::Json(value) => value,
    };
    match value {
        Value::Object(map) => Ok(map),
        other => Err(SessionError::InvalidPayload(format!(
            "stored session is {}, not an object",
            kind_of(&other)
        ))),
    }
}

fn stringify_wide_integers(value: Value) -> Value {
    match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                if u > MAX_SAFE_INTEGER {
                    return Value::String(u.to_string());
                }
            } else if let Some(i) = n.as_i64() {
                if i.unsigned_abs() > MAX_SAFE_INTEGER {
                    return Value::String(i.to_string());
                }
            }
            Value::Number(n)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(stringify_wide_integers).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, stringify_wide_integers(v)))
                .collect(),
        ),
        other => other,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Partial user record read back from a session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionData(Map<String, Value>);

impl SessionData {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    /// Accepts a JSON number or its decimal-string form.
    pub fn get_i64(&self, field: &str) -> Option<i64> {
        match self.0.get(field)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    pub fn get_u64(&self, field: &str) -> Option<u64> {
        match self.0.get(field)? {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Decodes into a caller type. Wide integers arrive as strings; see
    /// [`crate::serde_helpers::int_string`].
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, SessionError> {
        Ok(serde_json::from_value(Value::Object(self.0.clone()))?)
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for SessionData {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(names: &[&str]) -> PayloadFields {
        PayloadFields::new(names.iter().copied()).unwrap()
    }

    #[test]
    fn test_fields_require_id() {
        assert!(matches!(
            PayloadFields::new(["email", "name"]),
            Err(SessionError::MissingIdField)
        ));
        assert!(PayloadFields::new(["email", "id"]).is_ok());
    }

    #[test]
    fn test_project_user_drops_unlisted_fields() {
        let user = json!({ "id": 7, "email": "a@b.c", "password": "secret" });
        let projected = project_user(&user, &fields(&["id", "email", "role"])).unwrap();

        assert_eq!(projected.len(), 2);
        assert_eq!(projected["id"], json!(7));
        assert_eq!(projected["email"], json!("a@b.c"));
        assert!(!projected.contains_key("password"));
        assert!(!projected.contains_key("role"));
    }

    #[test]
    fn test_project_user_rejects_non_objects() {
        let result = project_user(&vec![1, 2, 3], &fields(&["id"]));
        assert!(matches!(result, Err(SessionError::InvalidPayload(_))));
    }

    #[test]
    fn test_encode_stringifies_wide_integers() {
        let record = json!({
            "id": i64::MAX,
            "small": 42,
            "negative": i64::MIN,
            "nested": { "list": [u64::MAX, 1] },
            "ratio": 0.5
        });
        let Value::Object(map) = record else { unreachable!() };
        let encoded: Value = serde_json::from_str(&encode_record(map).unwrap()).unwrap();

        assert_eq!(encoded["id"], json!("9223372036854775807"));
        assert_eq!(encoded["small"], json!(42));
        assert_eq!(encoded["negative"], json!("-9223372036854775808"));
        assert_eq!(encoded["nested"]["list"], json!(["18446744073709551615", 1]));
        assert_eq!(encoded["ratio"], json!(0.5));
    }

    #[test]
    fn test_safe_integer_boundary() {
        let Value::Object(map) = json!({ "id": MAX_SAFE_INTEGER, "next": MAX_SAFE_INTEGER + 1 }) else {
            unreachable!()
        };
        let encoded: Value = serde_json::from_str(&encode_record(map).unwrap()).unwrap();
        assert_eq!(encoded["id"], json!(MAX_SAFE_INTEGER));
        assert_eq!(encoded["next"], json!("9007199254740992"));
    }

    #[test]
    fn test_decode_text_and_structured() {
        let from_text = decode_record(StoredValue::Text(r#"{"id":"1"}"#.into())).unwrap();
        let from_json = decode_record(StoredValue::Json(json!({ "id": "1" }))).unwrap();
        assert_eq!(from_text, from_json);

        assert!(matches!(
            decode_record(StoredValue::Json(json!("plain"))),
            Err(SessionError::InvalidPayload(_))
        ));
        assert!(matches!(
            decode_record(StoredValue::Text("{not json".into())),
            Err(SessionError::Serialization(_))
        ));
    }

    #[test]
    fn test_session_data_accessors() {
        let Value::Object(map) = json!({ "id": "9223372036854775807", "age": 30, "name": "Ana" }) else {
            unreachable!()
        };
        let data = SessionData::from(map);

        assert_eq!(data.get_i64("id"), Some(i64::MAX));
        assert_eq!(data.get_u64("age"), Some(30));
        assert_eq!(data.get_str("name"), Some("Ana"));
        assert_eq!(data.get_str("missing"), None);
        assert!(data.contains("age"));
        assert_eq!(data.len(), 3);
    }
}
