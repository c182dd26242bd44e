//! Expand/collapse state keyed by structural path.
//!
//! Each visible node is addressed by a string key derived from its
//! ancestor path and its label, e.g. `"0/Frame/1/Steel casing"`. The
//! open/closed flags live in an explicit, caller-owned [`ExpandedState`]
//! that the functions here transition; nothing is persisted and one
//! viewing session owns exactly one state.

use crate::utils::config::KEY_SEPARATOR;
use std::collections::HashMap;

/// Derive the key for a node from its label and ancestor path
///
/// **Public** - the key scheme shared by state and row walk
///
/// Pure concatenation: the same `(label, path)` pair always yields the
/// same key. Sibling uniqueness requires the caller to include the
/// sibling's index in `path`; two manual callers passing the same path
/// and label collide, which is accepted (the row walk derives paths
/// that embed both the ancestor key and the child index, so keys it
/// produces cannot collide).
pub fn node_key(label: &str, path: &str) -> String {
    format!("{}{}{}", path, KEY_SEPARATOR, label)
}

/// Session-scoped open/closed flags, keyed by structural path
///
/// Created empty per viewing session, mutated by user interaction,
/// discarded when the view is torn down.
#[derive(Debug, Clone, Default)]
pub struct ExpandedState {
    open: HashMap<String, bool>,
}

impl ExpandedState {
    /// Create an empty state (everything closed)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the open flag for a key
    ///
    /// No validation, idempotent.
    pub fn toggle_row(&mut self, key: &str, open: bool) {
        self.open.insert(key.to_string(), open);
    }

    /// Whether a key is currently open; unknown keys read as closed
    pub fn is_open(&self, key: &str) -> bool {
        self.open.get(key).copied().unwrap_or(false)
    }

    /// Close every known key strictly nested under `parent_key`
    ///
    /// A prefix scan over keys that have been touched at least once,
    /// not a tree walk: collapsing a parent must also collapse all of
    /// its previously expanded descendants, without needing the tree
    /// structure at call time. The parent's own flag is untouched.
    pub fn close_descendants(&mut self, parent_key: &str) {
        let prefix = format!("{}{}", parent_key, KEY_SEPARATOR);
        for (key, open) in self.open.iter_mut() {
            if key.starts_with(&prefix) {
                *open = false;
            }
        }
    }

    /// Number of keys that have been touched so far
    pub fn known_keys(&self) -> usize {
        self.open.len()
    }
}
