//! In-memory browser history.

use std::sync::{Arc, Mutex};

use tracing::debug;

use gatehouse_core::traits::Navigator;

#[derive(Debug)]
struct History {
    entries: Vec<String>,
    index: usize,
    replacements: usize,
}

/// Models a browser tab's history stack.
///
/// `push` adds an entry (a link click), `replace` overwrites the current one
/// (a redirect). Clones share the same history.
#[derive(Debug, Clone)]
pub struct HistoryNavigator {
    history: Arc<Mutex<History>>,
}

impl HistoryNavigator {
    /// Creates a history whose only entry is `start`.
    pub fn new(start: impl Into<String>) -> Self {
        Self {
            history: Arc::new(Mutex::new(History {
                entries: vec![start.into()],
                index: 0,
                replacements: 0,
            })),
        }
    }

    /// Navigates to `path`, discarding any forward entries.
    pub fn push(&self, path: &str) {
        let mut history = self.lock();
        let keep = history.index + 1;
        history.entries.truncate(keep);
        history.entries.push(path.to_string());
        history.index = keep;
    }

    /// Steps back one entry. Returns the new current path, or `None` at the
    /// start of history.
    pub fn back(&self) -> Option<String> {
        let mut history = self.lock();
        if history.index == 0 {
            return None;
        }
        history.index -= 1;
        Some(history.entries[history.index].clone())
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> Vec<String> {
        self.lock().entries.clone()
    }

    /// How many replace-style navigations have been issued.
    pub fn replacements(&self) -> usize {
        self.lock().replacements
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, History> {
        self.history.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Navigator for HistoryNavigator {
    fn replace(&self, path: &str) {
        let mut history = self.lock();
        let index = history.index;
        debug!(from = %history.entries[index], to = %path, "Replace navigation");
        history.entries[index] = path.to_string();
        history.replacements += 1;
    }

    fn current(&self) -> String {
        let history = self.lock();
        history.entries[history.index].clone()
    }
}
