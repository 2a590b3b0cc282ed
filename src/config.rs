//! Configuration for the account store

/// Default backend key holding the JSON-encoded user collection
pub const DEFAULT_USERS_KEY: &str = "users";

/// Default backend key holding the JSON-encoded session marker
pub const DEFAULT_SESSION_KEY: &str = "currentUser";

/// Account store configuration
///
/// The key names are configurable so that two stores can share one
/// backend without colliding.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Backend key under which the user collection is persisted
    pub users_key: String,

    /// Backend key under which the current-session marker is persisted
    pub session_key: String,
}

impl StoreConfig {
    /// Create config with the default key layout (`users` / `currentUser`)
    pub fn new() -> Self {
        Self {
            users_key: DEFAULT_USERS_KEY.to_string(),
            session_key: DEFAULT_SESSION_KEY.to_string(),
        }
    }

    /// Override the collection key
    pub fn with_users_key(mut self, key: impl Into<String>) -> Self {
        self.users_key = key.into();
        self
    }

    /// Override the session marker key
    pub fn with_session_key(mut self, key: impl Into<String>) -> Self {
        self.session_key = key.into();
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new()
    }
}
