//! In-memory session store.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use dashmap::DashMap;

use gatehouse_core::error::AppError;
use gatehouse_core::result::AppResult;
use gatehouse_core::traits::SessionStorage;

/// Session store held in process memory.
///
/// Clones share the same entries. The store can be switched unavailable to
/// model a context with no persistent storage, in which case every access
/// fails.
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    entries: Arc<DashMap<String, String>>,
    available: Arc<AtomicBool>,
}

impl MemoryStorage {
    /// Creates an empty, available store.
    pub fn new() -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            available: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Marks the store available or unavailable.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn ensure_available(&self) -> AppResult<()> {
        if self.is_available() {
            Ok(())
        } else {
            Err(AppError::storage("Session storage is not available"))
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStorage for MemoryStorage {
    fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.ensure_available()?;
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.ensure_available()?;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        self.ensure_available()?;
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatehouse_core::error::ErrorKind;

    #[test]
    fn test_set_get_remove() {
        let store = MemoryStorage::new();
        store.set("token", "abc").unwrap();
        assert_eq!(store.get("token").unwrap(), Some("abc".to_string()));

        store.remove("token").unwrap();
        assert_eq!(store.get("token").unwrap(), None);
        store.remove("token").unwrap();
    }

    #[test]
    fn test_clones_share_entries() {
        let store = MemoryStorage::new();
        let other = store.clone();
        other.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap(), Some("v".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_unavailable_store_rejects_access() {
        let store = MemoryStorage::new();
        store.set_available(false);
        assert!(!store.is_available());
        assert_eq!(store.get("k").unwrap_err().kind, ErrorKind::Storage);
        assert!(store.set("k", "v").is_err());

        store.set_available(true);
        assert_eq!(store.get("k").unwrap(), None);
    }
}
