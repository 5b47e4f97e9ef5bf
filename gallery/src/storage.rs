//! Per-tab session key-value store.
//!
//! SYSTEM CONTEXT
//! ==============
//! The scroll record is the only state that survives a navigation. In the
//! browser it lives in `sessionStorage`; host tests use [`MemoryStore`], whose
//! clones share one map so a single "tab session" can span several simulated
//! page loads.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::consts::SCROLL_KEY_PREFIX;

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

/// Minimal string key-value store with session lifetime.
///
/// Writes are best-effort: a backend that cannot persist drops the value.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

impl<S: SessionStore + ?Sized> SessionStore for Rc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value);
    }
}

/// Storage key of the scroll record for `album_id`.
#[must_use]
pub fn scroll_key(album_id: &str) -> String {
    format!("{SCROLL_KEY_PREFIX}{album_id}")
}

/// In-memory [`SessionStore`]. Cloning shares the underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
    }
}
