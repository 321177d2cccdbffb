//! Session Store
//!
//! Key-value persistence for the auth token, user id and recent
//! searches. Implementations supply `get`/`set`/`remove`; the typed
//! accessors are provided on top.

mod history;

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::domain::LoginGrant;

pub use history::SearchHistory;

pub const TOKEN_KEY: &str = "token";
pub const USER_ID_KEY: &str = "userId";
pub const HISTORY_KEY: &str = "weatherHistory";

/// Key-value surface injected into controllers
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);

    fn token(&self) -> Option<String> {
        self.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    fn user_id(&self) -> Option<String> {
        self.get(USER_ID_KEY).filter(|u| !u.is_empty())
    }

    /// A user id is what gates searching
    fn is_signed_in(&self) -> bool {
        self.user_id().is_some()
    }

    fn sign_in(&self, grant: &LoginGrant) {
        self.set(TOKEN_KEY, &grant.token);
        if let Some(user_id) = &grant.user_id {
            self.set(USER_ID_KEY, user_id.as_str());
        }
    }

    fn sign_out(&self) {
        self.remove(TOKEN_KEY);
        self.remove(USER_ID_KEY);
    }

    /// Stored history; unreadable data is treated as empty
    fn history(&self) -> SearchHistory {
        match self.get(HISTORY_KEY) {
            Some(raw) => serde_json::from_str::<Vec<serde_json::Value>>(&raw)
                .map(SearchHistory::from_json_values)
                .unwrap_or_else(|e| {
                    log::warn!("Discarding unreadable search history: {}", e);
                    SearchHistory::default()
                }),
            None => SearchHistory::default(),
        }
    }

    fn save_history(&self, history: &SearchHistory) {
        match serde_json::to_string(history.entries()) {
            Ok(raw) => self.set(HISTORY_KEY, &raw),
            Err(e) => log::error!("Failed to serialize search history: {}", e),
        }
    }

    /// Move `city` to the front of the stored history and persist it
    fn record_search(&self, city: &str, limit: usize) -> SearchHistory {
        let mut history = self.history();
        history.record(city, limit);
        self.save_history(&history);
        history
    }
}

/// In-process store, used off the browser and in tests
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with a signed-in user
    pub fn signed_in(token: &str, user_id: &str) -> Self {
        let store = Self::new();
        store.set(TOKEN_KEY, token);
        store.set(USER_ID_KEY, user_id);
        store
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values.lock().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.values.lock().remove(key);
    }
}
