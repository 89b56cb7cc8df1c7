//! Identity claims carried in a bearer token payload.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Identity claims embedded in a token payload.
///
/// Every field is optional on the wire. A missing or `null` field decodes to
/// an empty value; numbers and booleans are accepted where strings are
/// expected, since issuers commonly emit numeric IDs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID.
    #[serde(default, deserialize_with = "lenient_string")]
    pub user_id: String,
    /// Email address.
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,
    /// Display name.
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    /// Phone number.
    #[serde(default, deserialize_with = "lenient_string")]
    pub phone: String,
    /// Role ID.
    #[serde(default, deserialize_with = "lenient_string")]
    pub role_id: String,
    /// Role display name.
    #[serde(default, deserialize_with = "lenient_string")]
    pub role_name: String,
    /// Free-form role attributes.
    #[serde(default, deserialize_with = "lenient_map")]
    pub role_data: Map<String, Value>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    })
}

fn lenient_map<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(map) => map,
        _ => Map::new(),
    })
}
