//! Navigation targets and guarded route configuration.

use serde::{Deserialize, Serialize};

/// Navigation targets used by logout and the route guards, plus the
/// paths each guard wraps.
///
/// The public entry must be listed under `anonymous` and the landing path
/// under `protected`, otherwise the two guards can redirect into each other.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutesConfig {
    /// Where logged-out users are sent (login screen).
    #[serde(default = "default_public_entry")]
    pub public_entry: String,
    /// Where logged-in users are sent away from anonymous-only views.
    #[serde(default = "default_authenticated_landing")]
    pub authenticated_landing: String,
    /// Paths that require an authenticated session.
    #[serde(default = "default_protected")]
    pub protected: Vec<String>,
    /// Paths that require the absence of a session.
    #[serde(default = "default_anonymous")]
    pub anonymous: Vec<String>,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            public_entry: default_public_entry(),
            authenticated_landing: default_authenticated_landing(),
            protected: default_protected(),
            anonymous: default_anonymous(),
        }
    }
}

fn default_public_entry() -> String {
    "/login".to_string()
}

fn default_authenticated_landing() -> String {
    "/dashboard".to_string()
}

fn default_protected() -> Vec<String> {
    vec![
        "/dashboard".to_string(),
        "/activities".to_string(),
        "/master-data".to_string(),
    ]
}

fn default_anonymous() -> Vec<String> {
    vec!["/login".to_string()]
}
