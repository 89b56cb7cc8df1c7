//! Read-only identity projection of a token's claims.

use serde_json::{Map, Value};

use crate::jwt::Claims;

/// Who the current session belongs to, as claimed by the token.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Identity {
    pub user_id: String,
    pub email: String,
    pub name: String,
    pub phone: String,
    pub role_id: String,
    pub role_name: String,
    pub role_attributes: Map<String, Value>,
}

impl Identity {
    /// True when no claim carried a value, e.g. after logging in with a
    /// token whose payload could not be read.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.email,
            name: claims.name,
            phone: claims.phone,
            role_id: claims.role_id,
            role_name: claims.role_name,
            role_attributes: claims.role_data,
        }
    }
}
