//! Session lifecycle events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Events describing how the session changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionEvent {
    /// A stored session was found valid at startup.
    Restored {
        /// The user ID from the token claims.
        user_id: String,
        /// When the session expires.
        expires_at: DateTime<Utc>,
    },
    /// A token was accepted by an explicit login.
    LoggedIn {
        /// The user ID from the token claims (empty if undecodable).
        user_id: String,
        /// When the session expires.
        expires_at: DateTime<Utc>,
    },
    /// The session was cleared by an explicit logout.
    LoggedOut,
    /// A stored session was past its expiry at startup and was cleared.
    Expired {
        /// The expiry instant that had passed.
        expired_at: DateTime<Utc>,
    },
    /// A stored session could not be used at startup and was cleared.
    Discarded {
        /// Why the stored entries were rejected.
        reason: String,
    },
}

impl SessionEvent {
    /// Short machine-readable name of the event.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Restored { .. } => "restored",
            Self::LoggedIn { .. } => "logged_in",
            Self::LoggedOut => "logged_out",
            Self::Expired { .. } => "expired",
            Self::Discarded { .. } => "discarded",
        }
    }
}
