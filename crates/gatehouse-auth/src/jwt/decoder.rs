//! Claims extraction from a bearer token without signature verification.
//!
//! The server that accepted the credentials and issued the token is the one
//! that trusts it. The client only reads the payload for display and never
//! checks the signature segment.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use serde_json::Value;
use thiserror::Error;

use super::claims::Claims;

/// Reasons a token payload could not be read.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The token has no payload segment after the header.
    #[error("Invalid token format: expected at least 2 segments, found {0}")]
    InvalidFormat(usize),
    /// The payload segment is not valid base64url.
    #[error("Invalid base64 in token payload")]
    InvalidBase64,
    /// The payload is not valid JSON.
    #[error("Invalid JSON in token payload: {0}")]
    InvalidJson(String),
    /// The payload is JSON but not an object.
    #[error("Token payload is not a JSON object")]
    NotAnObject,
}

/// Reads [`Claims`] out of a token's payload segment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClaimsDecoder;

impl ClaimsDecoder {
    /// Creates a new decoder.
    pub fn new() -> Self {
        Self
    }

    /// Decodes the payload claims of `token`.
    ///
    /// Only the second segment is read, so `header.payload` without a
    /// signature is accepted as well.
    ///
    /// Accepts both unpadded base64url and padded or standard-alphabet
    /// base64 in the payload, since issuers are not consistent about it.
    pub fn decode(&self, token: &str) -> Result<Claims, DecodeError> {
        let segments: Vec<&str> = token.trim().split('.').collect();
        if segments.len() < 2 {
            return Err(DecodeError::InvalidFormat(segments.len()));
        }

        let normalized: String = segments[1]
            .trim_end_matches('=')
            .chars()
            .map(|c| match c {
                '+' => '-',
                '/' => '_',
                other => other,
            })
            .collect();

        let bytes = URL_SAFE_NO_PAD
            .decode(normalized.as_bytes())
            .map_err(|_| DecodeError::InvalidBase64)?;

        let payload: Value =
            serde_json::from_slice(&bytes).map_err(|e| DecodeError::InvalidJson(e.to_string()))?;

        if !payload.is_object() {
            return Err(DecodeError::NotAnObject);
        }

        serde_json::from_value(payload).map_err(|e| DecodeError::InvalidJson(e.to_string()))
    }
}
