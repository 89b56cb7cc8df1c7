//! Persistent key/value slot for the session token and its expiry.

use crate::result::AppResult;

/// Storage capability backing the session across reloads.
///
/// Mirrors browser local storage: synchronous string get/set/remove scoped
/// to one process-wide slot. Only the session manager writes to it.
pub trait SessionStorage: Send + Sync + std::fmt::Debug + 'static {
    /// Whether the store can be touched right now.
    ///
    /// Returns `false` in contexts where persistent storage does not exist
    /// (e.g. a non-interactive pre-render pass). Callers must defer work
    /// instead of reading or writing in that case.
    fn is_available(&self) -> bool {
        true
    }

    /// Get a value by key. Returns `None` if the key is not set.
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Set a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Remove a key. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> AppResult<()>;
}
