//! Shared test helpers for integration tests.

use std::sync::Arc;

use chrono::{DateTime, Duration};

use gatehouse_auth::storage::{EXPIRATION_KEY, TOKEN_KEY};
use gatehouse_auth::{Claims, HistoryNavigator, MemoryStorage, SessionManager, TokenEncoder};
use gatehouse_core::config::{RoutesConfig, SessionConfig};
use gatehouse_core::traits::{Clock, ManualClock, SessionStorage};

/// A page load wired to in-memory collaborators
pub struct TestApp {
    /// Session manager under test
    pub manager: SessionManager,
    /// Store shared across simulated reloads
    pub storage: MemoryStorage,
    /// Controllable time
    pub clock: ManualClock,
    /// History of the tab
    pub navigator: HistoryNavigator,
}

impl TestApp {
    /// Fresh tab with an empty store, currently showing `path`
    pub fn new(path: &str) -> Self {
        let start = DateTime::from_timestamp(1_750_000_000, 0).expect("valid timestamp");
        Self::with(MemoryStorage::new(), ManualClock::new(start), path)
    }

    /// Tab over an existing store and clock
    pub fn with(storage: MemoryStorage, clock: ManualClock, path: &str) -> Self {
        let navigator = HistoryNavigator::new(path);
        let manager = SessionManager::new(
            Arc::new(storage.clone()),
            Arc::new(clock.clone()),
            Arc::new(navigator.clone()),
            SessionConfig::default(),
            &RoutesConfig::default(),
        );
        Self {
            manager,
            storage,
            clock,
            navigator,
        }
    }

    /// Simulates a page reload: same store and clock, new in-memory state
    pub fn reload(&self, path: &str) -> Self {
        Self::with(self.storage.clone(), self.clock.clone(), path)
    }

    /// Writes a stored session expiring `offset` from now
    pub fn seed(&self, token: &str, offset: Duration) {
        let expires_at = self.clock.now() + offset;
        self.storage.set(TOKEN_KEY, token).expect("seed token");
        self.storage
            .set(EXPIRATION_KEY, &expires_at.timestamp_millis().to_string())
            .expect("seed expiration");
    }

    /// Whether the store holds either session key
    pub fn store_has_session(&self) -> bool {
        self.storage.get(TOKEN_KEY).expect("read token").is_some()
            || self
                .storage
                .get(EXPIRATION_KEY)
                .expect("read expiration")
                .is_some()
    }
}

/// Unsigned token carrying the given user ID and a few other claims
pub fn token_for(user_id: &str) -> String {
    let claims = Claims {
        user_id: user_id.to_string(),
        email: format!("{user_id}@example.com"),
        name: "Test User".to_string(),
        role_id: "2".to_string(),
        role_name: "Supervisor".to_string(),
        ..Claims::default()
    };
    TokenEncoder::new().unsigned(&claims).expect("encode claims")
}
