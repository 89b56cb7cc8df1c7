//! Unsigned token creation for fixtures and local development.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};

use super::claims::Claims;

/// Header of every token produced here.
const UNSIGNED_HEADER: &str = r#"{"alg":"none","typ":"JWT"}"#;

/// Builds `alg: none` tokens carrying the given claims.
///
/// These tokens have an empty signature segment. They are only meaningful
/// to the client-side decoder; no server should accept them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenEncoder;

impl TokenEncoder {
    /// Creates a new encoder.
    pub fn new() -> Self {
        Self
    }

    /// Encodes `claims` into an unsigned token.
    pub fn unsigned(&self, claims: &Claims) -> Result<String, serde_json::Error> {
        let payload = serde_json::to_string(claims)?;
        Ok(format!(
            "{}.{}.",
            URL_SAFE_NO_PAD.encode(UNSIGNED_HEADER),
            URL_SAFE_NO_PAD.encode(payload)
        ))
    }
}
