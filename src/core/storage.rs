//=========================================================================
// Key-Value Storage
//=========================================================================
//
// Minimal persistence seam. The game stores a single value through it:
// the locally generated login token.
//
//=========================================================================

use std::collections::HashMap;

//=== KeyValueStore =======================================================

/// String key-value persistence provided by the host.
pub trait KeyValueStore: Send {
    /// Returns the stored value for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str);
}

//=== MemoryStore =========================================================

/// In-memory store; contents are lost when dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with one entry.
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.set(key, value);
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_previous_value() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("login_id"), None);

        store.set("login_id", "a");
        store.set("login_id", "b");
        assert_eq!(store.get("login_id").as_deref(), Some("b"));
    }

    #[test]
    fn with_value_prefills() {
        let store = MemoryStore::with_value("k", "v");
        assert_eq!(store.get("k").as_deref(), Some("v"));
        assert_eq!(store.get("other"), None);
    }
}
