//! Observable session state.

use chrono::{DateTime, Utc};

use super::identity::Identity;

/// A live session: the token, when it stops being honored, and who it
/// belongs to.
///
/// Token and expiry only ever exist together. The identity is always
/// present, but may be empty when login accepted an unreadable token.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveSession {
    /// The bearer credential.
    pub token: String,
    /// Absolute expiry, computed at login.
    pub expires_at: DateTime<Utc>,
    /// Claims read from the token.
    pub identity: Identity,
}

/// Point-in-time view of the session manager's state.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    /// The current session, if any.
    pub session: Option<ActiveSession>,
    /// True until startup reconciliation with the store has completed.
    pub loading: bool,
}

impl SessionSnapshot {
    /// State before startup reconciliation has run.
    pub fn initial() -> Self {
        Self {
            session: None,
            loading: true,
        }
    }

    /// Whether a token with an identity is held.
    ///
    /// Derived from the session on every call, never cached.
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.session.as_ref().map(|s| &s.identity)
    }

    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.session.as_ref().map(|s| s.expires_at)
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self::initial()
    }
}
