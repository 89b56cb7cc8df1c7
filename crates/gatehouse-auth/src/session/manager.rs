//! Session lifecycle manager: startup reconciliation, login and logout.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Duration, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{debug, error, info, warn};

use gatehouse_core::config::{RoutesConfig, SessionConfig};
use gatehouse_core::events::SessionEvent;
use gatehouse_core::traits::{Clock, Navigator, SessionStorage};

use crate::jwt::ClaimsDecoder;
use crate::storage::{EXPIRATION_KEY, TOKEN_KEY};

use super::identity::Identity;
use super::state::{ActiveSession, SessionSnapshot};

/// Capacity of the session event channel.
const EVENT_CHANNEL_CAPACITY: usize = 16;

/// What startup reconciliation did with the stored session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// Storage is not reachable yet; `loading` stays true.
    Deferred,
    /// Reconciliation already ran for this manager.
    AlreadyInitialized,
    /// Nothing was stored.
    Empty,
    /// A valid stored session was restored.
    Restored,
    /// The stored session had expired and was cleared.
    Expired,
    /// The stored session was unusable and was cleared.
    Discarded,
}

/// Single source of truth for authentication state.
///
/// Owns the in-memory session, mediates every access to the session store,
/// and publishes state changes through a `watch` channel so all observers
/// see updates in the same order. Clones share the same state.
#[derive(Clone)]
pub struct SessionManager {
    /// Persistent slot for the token and its expiry.
    storage: Arc<dyn SessionStorage>,
    /// Reads identity claims from tokens.
    decoder: ClaimsDecoder,
    /// Time source for expiry.
    clock: Arc<dyn Clock>,
    /// Used by logout to leave protected views.
    navigator: Arc<dyn Navigator>,
    /// Session lifetime settings.
    session_config: SessionConfig,
    /// Where logout navigates to.
    public_entry: String,
    /// Current state and its subscribers.
    state: Arc<watch::Sender<SessionSnapshot>>,
    /// Lifecycle events for diagnostics.
    events: broadcast::Sender<SessionEvent>,
    /// Set once startup reconciliation has run.
    initialized: Arc<AtomicBool>,
    /// Set when the store rejected a clear; retried once it is reachable.
    pending_clear: Arc<AtomicBool>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("session_config", &self.session_config)
            .field("public_entry", &self.public_entry)
            .field("authenticated", &self.is_authenticated())
            .field("loading", &self.loading())
            .finish()
    }
}

impl SessionManager {
    /// Creates a manager in the loading state. Call [`initialize`] once the
    /// storage is reachable to reconcile with what was persisted.
    ///
    /// [`initialize`]: SessionManager::initialize
    pub fn new(
        storage: Arc<dyn SessionStorage>,
        clock: Arc<dyn Clock>,
        navigator: Arc<dyn Navigator>,
        session_config: SessionConfig,
        routes_config: &RoutesConfig,
    ) -> Self {
        let (state, _) = watch::channel(SessionSnapshot::initial());
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Self {
            storage,
            decoder: ClaimsDecoder::new(),
            clock,
            navigator,
            session_config,
            public_entry: routes_config.public_entry.clone(),
            state: Arc::new(state),
            events,
            initialized: Arc::new(AtomicBool::new(false)),
            pending_clear: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Reconciles in-memory state with the session store, once.
    ///
    /// 1. Read token and expiry from the store
    /// 2. Clear them if expired, incomplete, or undecodable
    /// 3. Otherwise restore the session with its claims
    /// 4. Publish the result and `loading = false` in one update
    ///
    /// Returns [`InitOutcome::Deferred`] without touching anything while the
    /// store is unavailable, so the call can be repeated from an interactive
    /// context. Every call with a reachable store first finishes any clear
    /// the store rejected earlier, e.g. during a logout.
    pub async fn initialize(&self) -> InitOutcome {
        // Let the first render observe `loading` before reconciliation.
        tokio::task::yield_now().await;

        if !self.storage.is_available() {
            debug!("Session storage unavailable, deferring initialization");
            return InitOutcome::Deferred;
        }

        self.retry_pending_clear();

        if self.initialized.swap(true, Ordering::SeqCst) {
            return InitOutcome::AlreadyInitialized;
        }

        let (restored, outcome) = self.reconcile();

        self.state.send_modify(|state| {
            state.session = restored;
            state.loading = false;
        });

        debug!(outcome = ?outcome, "Session initialization complete");
        outcome
    }

    fn reconcile(&self) -> (Option<ActiveSession>, InitOutcome) {
        let token = self.read_key(TOKEN_KEY);
        let expiration = self.read_key(EXPIRATION_KEY);

        let (token, expiration) = match (token, expiration) {
            (None, None) => return (None, InitOutcome::Empty),
            (Some(token), Some(expiration)) => (token, expiration),
            _ => return (None, self.discard("incomplete stored session")),
        };

        let Some(expires_at) = parse_expiration(&expiration) else {
            return (None, self.discard("unreadable expiration timestamp"));
        };

        if expires_at <= self.clock.now() {
            self.clear_storage();
            info!(expired_at = %expires_at, "Stored session expired, cleared");
            self.publish(SessionEvent::Expired {
                expired_at: expires_at,
            });
            return (None, InitOutcome::Expired);
        }

        match self.decoder.decode(&token) {
            Ok(claims) => {
                let identity = Identity::from(claims);
                info!(user_id = %identity.user_id, expires_at = %expires_at, "Session restored");
                self.publish(SessionEvent::Restored {
                    user_id: identity.user_id.clone(),
                    expires_at,
                });
                let session = ActiveSession {
                    token,
                    expires_at,
                    identity,
                };
                (Some(session), InitOutcome::Restored)
            }
            Err(e) => {
                warn!(error = %e, "Stored token claims could not be decoded");
                (None, self.discard(&format!("malformed token: {e}")))
            }
        }
    }

    /// Accepts a freshly issued token.
    ///
    /// The token and `now + session duration` are persisted before state is
    /// published. An undecodable token is still accepted with an empty
    /// identity; only startup reconciliation rejects such tokens.
    ///
    /// A blank token is not a credential: it is ignored and nothing changes.
    pub fn login(&self, token: &str) {
        if token.trim().is_empty() {
            warn!("Ignoring login with an empty token");
            return;
        }

        let expires_at = self.clock.now() + self.session_config.duration();

        let token_saved = self.write_key(TOKEN_KEY, token);
        let expiry_saved =
            self.write_key(EXPIRATION_KEY, &expires_at.timestamp_millis().to_string());
        if token_saved && expiry_saved {
            // The new entries replace whatever an earlier clear left behind.
            self.pending_clear.store(false, Ordering::SeqCst);
        }

        let identity = match self.decoder.decode(token) {
            Ok(claims) => Identity::from(claims),
            Err(e) => {
                warn!(error = %e, "Token claims could not be decoded, continuing without identity");
                Identity::default()
            }
        };
        let user_id = identity.user_id.clone();

        self.state.send_modify(|state| {
            state.session = Some(ActiveSession {
                token: token.to_string(),
                expires_at,
                identity,
            });
        });

        info!(user_id = %user_id, expires_at = %expires_at, "Login successful");
        self.publish(SessionEvent::LoggedIn {
            user_id,
            expires_at,
        });
    }

    /// Ends the session and navigates to the public entry.
    ///
    /// Always succeeds locally. Calling it while logged out only repeats the
    /// navigation. If the store rejects the clear, the stored entries are
    /// removed on the next [`initialize`] that finds the store reachable.
    ///
    /// [`initialize`]: SessionManager::initialize
    pub fn logout(&self) {
        self.clear_storage();

        let was_authenticated = self.state.send_if_modified(|state| state.session.take().is_some());

        if was_authenticated {
            info!("Logout completed");
            self.publish(SessionEvent::LoggedOut);
        } else {
            debug!("Logout requested without an active session");
        }

        self.navigator.replace(&self.public_entry);
    }

    /// Current state.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    /// Whether a session is held.
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// True until startup reconciliation completes.
    pub fn loading(&self) -> bool {
        self.state.borrow().loading
    }

    /// Identity of the current session.
    pub fn identity(&self) -> Option<Identity> {
        self.state.borrow().identity().cloned()
    }

    /// The raw bearer token, for attaching to outgoing requests.
    pub fn token(&self) -> Option<String> {
        self.state.borrow().token().map(str::to_string)
    }

    /// `Authorization` header value for the current session.
    pub fn authorization_header(&self) -> Option<String> {
        self.state.borrow().token().map(|t| format!("Bearer {t}"))
    }

    /// When the current session expires.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.state.borrow().expires_at()
    }

    /// Time left before the session's expiry, zero once it has passed.
    ///
    /// Informational only: a session past its expiry stays in memory until
    /// the next startup reconciliation.
    pub fn remaining(&self) -> Option<Duration> {
        let expires_at = self.expires_at()?;
        Some((expires_at - self.clock.now()).max(Duration::zero()))
    }

    /// Subscribes to state changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.subscribe()
    }

    /// Subscribes to lifecycle events.
    pub fn events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    fn discard(&self, reason: &str) -> InitOutcome {
        self.clear_storage();
        warn!(reason = %reason, "Stored session discarded");
        self.publish(SessionEvent::Discarded {
            reason: reason.to_string(),
        });
        InitOutcome::Discarded
    }

    fn publish(&self, event: SessionEvent) {
        // No receivers is fine.
        let _ = self.events.send(event);
    }

    fn read_key(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                warn!(key = key, error = %e, "Failed to read session storage");
                None
            }
        }
    }

    fn write_key(&self, key: &str, value: &str) -> bool {
        match self.storage.set(key, value) {
            Ok(()) => true,
            Err(e) => {
                error!(key = key, error = %e, "Failed to persist session entry");
                false
            }
        }
    }

    /// Removes both session entries. On failure the clear is remembered and
    /// retried by [`Self::retry_pending_clear`].
    fn clear_storage(&self) {
        let mut cleared = true;
        for key in [TOKEN_KEY, EXPIRATION_KEY] {
            if let Err(e) = self.storage.remove(key) {
                error!(key = key, error = %e, "Failed to clear session entry");
                cleared = false;
            }
        }
        self.pending_clear.store(!cleared, Ordering::SeqCst);
    }

    fn retry_pending_clear(&self) {
        if self.pending_clear.load(Ordering::SeqCst) {
            info!("Retrying session store clear");
            self.clear_storage();
        }
    }
}

/// Parses the stored expiry: integer milliseconds since the Unix epoch.
fn parse_expiration(raw: &str) -> Option<DateTime<Utc>> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .and_then(DateTime::from_timestamp_millis)
}
