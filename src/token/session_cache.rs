//! Session Cache
//!
//! Bridges the completion list and the later completion detail request: every
//! theme reference seen while augmenting a completion list is recorded here under
//! its short token name.
//!
//! Lifetime: created empty with the plugin, only grows while the editing session is
//! alive, cleared when the host disposes the session. Requests arrive one at a time on
//! the same thread, so a `RefCell` is enough.

use std::cell::RefCell;
use std::collections::HashMap;

/// Resolved theme value for a short token name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenConfigEntry {
    pub theme_key: String,
    pub token_value: String,
}

#[derive(Debug, Default)]
pub struct SessionCache {
    entries: RefCell<HashMap<String, TokenConfigEntry>>,
}

impl SessionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an entry. A later entry for the same token replaces the earlier one.
    pub fn insert(&self, token: &str, entry: TokenConfigEntry) {
        self.entries.borrow_mut().insert(token.to_string(), entry);
    }

    pub fn get(&self, token: &str) -> Option<TokenConfigEntry> {
        self.entries.borrow().get(token).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Drop every entry, used when the session ends
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}
