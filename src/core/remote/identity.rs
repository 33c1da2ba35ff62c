//=========================================================================
// Identity Book
//=========================================================================
//
// Local side of the player's identity: the persisted login token and the
// authoritative identity once the service has confirmed it.
//
//=========================================================================

use log::debug;
use uuid::Uuid;

use super::protocol::Identity;
use crate::core::storage::KeyValueStore;

/// Storage key of the local login token.
pub const LOGIN_KEY: &str = "login_id";

/// Login token persistence plus the confirmed identity.
pub struct IdentityBook {
    store: Box<dyn KeyValueStore>,
    current: Option<Identity>,
}

impl IdentityBook {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store, current: None }
    }

    /// Stored token, or a fresh UUID v4 when none exists.
    ///
    /// The second value is true when the token is new and the account has
    /// to be registered. Nothing is written here; the token is persisted
    /// only once a login with it succeeds.
    pub fn local_token(&self) -> (String, bool) {
        match self.store.get(LOGIN_KEY) {
            Some(id) => (id, false),
            None => {
                let id = Uuid::new_v4().to_string();
                debug!(target: "remote", "No stored login token, generated a new one");
                (id, true)
            }
        }
    }

    /// Records a confirmed login and persists its token.
    pub(crate) fn confirm(&mut self, identity: Identity) {
        self.store.set(LOGIN_KEY, &identity.local_id);
        self.current = Some(identity);
    }

    /// Updates the display name of the confirmed identity.
    pub(crate) fn rename(&mut self, name: &str) {
        if let Some(identity) = &mut self.current {
            identity.display_name = Some(name.to_string());
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.current.as_ref()
    }

    pub fn display_name(&self) -> Option<&str> {
        self.current.as_ref()?.display_name.as_deref()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::MemoryStore;

    #[test]
    fn missing_token_is_generated_but_not_stored() {
        let book = IdentityBook::new(Box::new(MemoryStore::new()));
        let (first, is_new) = book.local_token();
        assert!(is_new);
        assert!(Uuid::parse_str(&first).is_ok());

        let (second, is_new) = book.local_token();
        assert!(is_new);
        assert_ne!(first, second);
    }

    #[test]
    fn stored_token_is_reused() {
        let book = IdentityBook::new(Box::new(MemoryStore::with_value(LOGIN_KEY, "abc")));
        assert_eq!(book.local_token(), ("abc".to_string(), false));
    }

    #[test]
    fn confirm_persists_and_rename_updates() {
        let mut book = IdentityBook::new(Box::new(MemoryStore::new()));
        book.rename("ignored");
        assert!(book.identity().is_none());

        book.confirm(Identity {
            local_id: "abc".into(),
            player_id: "P1".into(),
            display_name: None,
        });
        assert_eq!(book.local_token(), ("abc".to_string(), false));
        assert_eq!(book.display_name(), None);

        book.rename("Alice");
        assert_eq!(book.display_name(), Some("Alice"));
    }
}
