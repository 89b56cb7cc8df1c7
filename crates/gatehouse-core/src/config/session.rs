//! Session lifetime configuration.

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Session lifetime configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Absolute session lifetime in hours, counted from login.
    #[serde(default = "default_duration_hours")]
    pub duration_hours: u32,
}

impl SessionConfig {
    /// Returns the session lifetime as a `chrono::Duration`.
    pub fn duration(&self) -> Duration {
        Duration::hours(i64::from(self.duration_hours))
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            duration_hours: default_duration_hours(),
        }
    }
}

fn default_duration_hours() -> u32 {
    8
}
