//! AccountStore — core account management over a key-value backend
//!
//! Owns the user collection and the current-session marker. All operations
//! return `Result<T, StoreError>` (railway programming). The collection is
//! held in memory and written back wholesale after every mutation.
//!
//! # Example
//!
//! ```rust,no_run
//! use account_store::{AccountStore, JsonFileBackend, NewUser, StoreConfig};
//!
//! fn main() -> account_store::Result<()> {
//!     let backend = JsonFileBackend::new("/data/accounts")?;
//!     let mut store = AccountStore::open(StoreConfig::new(), Box::new(backend))?;
//!
//!     // Register
//!     let user = store.create(NewUser {
//!         first_name: "Alice".into(),
//!         last_name: "Smith".into(),
//!         email: "Alice@Example.com".into(),
//!         phone: "+15550001111".into(),
//!         password: "correct horse".into(),
//!     })?;
//!
//!     // Login → session marker
//!     let user = store.authenticate("alice@example.com", "correct horse")?;
//!     store.set_current_session(&user)?;
//!
//!     // Later: logout
//!     store.clear_session()?;
//!
//!     Ok(())
//! }
//! ```

use chrono::{Duration, Utc};
use tracing::{debug, info, warn};

use crate::backend::KeyValueBackend;
use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::types::{
    ExportMetadata, ExportSnapshot, ImportMode, NewUser, UserPatch, UserRecord, EXPORT_VERSION,
};

/// Aggregate counts over the user collection
#[derive(Debug, Clone)]
pub struct UserStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    /// Records that have logged in at least once
    pub with_login: usize,
    /// Records created within the last seven days
    pub recent: usize,
}

/// Core account store — manages the user collection and session marker
///
/// Single-writer: one store instance owns its backing keys. If two
/// instances share a backing store, the last full-collection write wins.
pub struct AccountStore {
    config: StoreConfig,
    backend: Box<dyn KeyValueBackend>,
    users: Vec<UserRecord>,
}

impl AccountStore {
    /// Open the store, loading the collection from the backend
    ///
    /// First use (key absent) seeds two demo accounts and persists them.
    /// An unreadable or corrupt collection is swallowed with a warning and
    /// the store starts empty; it is not re-seeded.
    pub fn open(config: StoreConfig, backend: Box<dyn KeyValueBackend>) -> Result<Self> {
        let mut store = Self {
            config,
            backend,
            users: Vec::new(),
        };

        match store.backend.read(&store.config.users_key) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<UserRecord>>(&raw) {
                Ok(users) => store.users = users,
                Err(e) => {
                    warn!(error = ?e, "User collection is unreadable; starting empty");
                }
            },
            Ok(None) => {
                let seeds = seed_users();
                store.persist(&seeds)?;
                store.users = seeds;
                info!(count = store.users.len(), "Seeded demo accounts");
            }
            Err(e) => {
                warn!(error = ?e, "Failed to read user collection; starting empty");
            }
        }

        info!(users = store.users.len(), "Account store ready");
        Ok(store)
    }

    /// Serialize a candidate collection and write it under the users key
    fn persist(&mut self, users: &[UserRecord]) -> Result<()> {
        let json = serde_json::to_string(users)?;
        self.backend.write(&self.config.users_key, &json)?;
        debug!(count = users.len(), "User collection persisted");
        Ok(())
    }

    // ─── Read Operations ───

    /// All records in insertion order
    pub fn list(&self) -> Vec<UserRecord> {
        self.users.clone()
    }

    /// Look up a record by email, compared case-insensitively
    pub fn find_by_email(&self, email: &str) -> Option<UserRecord> {
        email_position(&self.users, email).map(|idx| self.users[idx].clone())
    }

    /// Look up a record by id
    pub fn find_by_id(&self, id: u64) -> Option<UserRecord> {
        self.users.iter().find(|user| user.id == id).cloned()
    }

    /// Case-insensitive substring search over first name, last name, and email
    ///
    /// An empty query matches every record.
    pub fn search(&self, query: &str) -> Vec<UserRecord> {
        let needle = query.to_lowercase();
        let matches: Vec<UserRecord> = self
            .users
            .iter()
            .filter(|user| {
                user.first_name.to_lowercase().contains(&needle)
                    || user.last_name.to_lowercase().contains(&needle)
                    || user.email.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();

        debug!(query = %query, matches = matches.len(), "Search executed");
        matches
    }

    /// Aggregate statistics over the collection
    pub fn stats(&self) -> UserStats {
        let total = self.users.len();
        let active = self.users.iter().filter(|user| user.active).count();
        let cutoff = Utc::now() - Duration::days(7);

        UserStats {
            total,
            active,
            inactive: total - active,
            with_login: self
                .users
                .iter()
                .filter(|user| user.last_login.is_some())
                .count(),
            recent: self
                .users
                .iter()
                .filter(|user| user.created_at > cutoff)
                .count(),
        }
    }

    // ─── Write Operations ───

    /// Create a record, enforcing case-insensitive email uniqueness
    ///
    /// The email is stored lowercased; id is `max(existing) + 1`. Field
    /// validation is the caller's concern (see [`crate::validate`]).
    pub fn create(&mut self, new_user: NewUser) -> Result<UserRecord> {
        if email_position(&self.users, &new_user.email).is_some() {
            return Err(StoreError::DuplicateEmail(new_user.email));
        }

        let record = UserRecord {
            id: next_id(&self.users)?,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            email: new_user.email.to_lowercase(),
            phone: new_user.phone,
            password: new_user.password,
            created_at: Utc::now(),
            last_login: None,
            active: true,
        };

        let mut candidate = self.users.clone();
        candidate.push(record.clone());
        self.persist(&candidate)?;
        self.users = candidate;

        info!(user_id = record.id, email = %record.email, "User created");
        Ok(record)
    }

    /// Merge a patch into an existing record
    ///
    /// `Some` fields overwrite, `None` fields are kept. A patched email is
    /// taken verbatim, with no uniqueness re-check — callers pre-validate.
    pub fn update(&mut self, id: u64, patch: UserPatch) -> Result<UserRecord> {
        let idx = self
            .users
            .iter()
            .position(|user| user.id == id)
            .ok_or_else(|| StoreError::UserNotFound(id.to_string()))?;

        let mut candidate = self.users.clone();
        apply_patch(&mut candidate[idx], patch);
        let updated = candidate[idx].clone();

        self.persist(&candidate)?;
        self.users = candidate;

        info!(user_id = id, "User updated");
        Ok(updated)
    }

    /// Remove a record by id
    pub fn delete(&mut self, id: u64) -> Result<()> {
        let idx = self
            .users
            .iter()
            .position(|user| user.id == id)
            .ok_or_else(|| StoreError::UserNotFound(id.to_string()))?;

        let mut candidate = self.users.clone();
        candidate.remove(idx);
        self.persist(&candidate)?;
        self.users = candidate;

        info!(user_id = id, "User deleted");
        Ok(())
    }

    // ─── Authentication ───

    /// Authenticate by email and password, recording the login time
    ///
    /// Failure order: unknown email, then disabled account, then password
    /// mismatch. The stored password is compared verbatim.
    ///
    /// # Example
    /// ```rust,no_run
    /// # use account_store::AccountStore;
    /// # fn example(store: &mut AccountStore) -> account_store::Result<()> {
    /// let user = store.authenticate("john@example.com", "password123")?;
    /// store.set_current_session(&user)?;
    /// # Ok(()) }
    /// ```
    pub fn authenticate(&mut self, email: &str, password: &str) -> Result<UserRecord> {
        let idx = email_position(&self.users, email)
            .ok_or_else(|| StoreError::UserNotFound(email.to_string()))?;

        if !self.users[idx].active {
            return Err(StoreError::AccountDisabled(email.to_string()));
        }
        if self.users[idx].password != password {
            return Err(StoreError::InvalidCredentials);
        }

        let mut candidate = self.users.clone();
        candidate[idx].last_login = Some(Utc::now());
        let user = candidate[idx].clone();

        self.persist(&candidate)?;
        self.users = candidate;

        info!(user_id = user.id, email = %user.email, "Login successful");
        Ok(user)
    }

    /// Overwrite a record's password after checking the current one
    ///
    /// New-password strength is the caller's concern (see [`crate::validate`]).
    pub fn change_password(&mut self, id: u64, current: &str, new: &str) -> Result<UserRecord> {
        let idx = self
            .users
            .iter()
            .position(|user| user.id == id)
            .ok_or_else(|| StoreError::UserNotFound(id.to_string()))?;

        if self.users[idx].password != current {
            return Err(StoreError::InvalidCredentials);
        }

        let mut candidate = self.users.clone();
        candidate[idx].password = new.to_string();
        let user = candidate[idx].clone();

        self.persist(&candidate)?;
        self.users = candidate;

        info!(user_id = id, "Password changed");
        Ok(user)
    }

    // ─── Session Marker ───

    /// Store a snapshot of the given record as the current session
    ///
    /// The marker is an independent copy: it does not follow later changes
    /// to the record it was taken from.
    pub fn set_current_session(&mut self, user: &UserRecord) -> Result<()> {
        let json = serde_json::to_string(user)?;
        self.backend.write(&self.config.session_key, &json)?;
        debug!(user_id = user.id, "Session set");
        Ok(())
    }

    /// The current session snapshot, if one is set
    pub fn current_session(&self) -> Result<Option<UserRecord>> {
        match self.backend.read(&self.config.session_key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Drop the current session marker (logout)
    pub fn clear_session(&mut self) -> Result<()> {
        self.backend.remove(&self.config.session_key)?;
        debug!("Session cleared");
        Ok(())
    }

    // ─── Import / Export ───

    /// Snapshot the whole collection with export metadata
    pub fn export(&self) -> ExportSnapshot {
        ExportSnapshot {
            users: self.users.clone(),
            metadata: ExportMetadata {
                export_date: Utc::now(),
                total_users: self.users.len(),
                version: EXPORT_VERSION.to_string(),
            },
        }
    }

    /// Snapshot the collection as pretty-printed JSON
    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.export())?)
    }

    /// Import records from a JSON payload, returning how many were added
    ///
    /// Accepts either the wrapped export form (`{"users": [...], ...}`,
    /// metadata ignored) or a bare array of records. `Replace` swaps in the
    /// payload wholesale; `Merge` appends only records whose email is not
    /// already present, each re-assigned a fresh id.
    ///
    /// # Example
    /// ```rust,no_run
    /// # use account_store::{AccountStore, ImportMode};
    /// # fn example(store: &mut AccountStore) -> account_store::Result<()> {
    /// let backup = store.export_json()?;
    /// let restored = store.import_json(&backup, ImportMode::Replace)?;
    /// println!("Restored {restored} users");
    /// # Ok(()) }
    /// ```
    pub fn import_json(&mut self, payload: &str, mode: ImportMode) -> Result<usize> {
        let incoming = parse_import(payload)?;

        let (candidate, added) = match mode {
            ImportMode::Replace => {
                let count = incoming.len();
                (incoming, count)
            }
            ImportMode::Merge => {
                let mut candidate = self.users.clone();
                let mut added = 0;
                for mut record in incoming {
                    if email_position(&candidate, &record.email).is_some() {
                        continue;
                    }
                    record.id = next_id(&candidate)?;
                    candidate.push(record);
                    added += 1;
                }
                (candidate, added)
            }
        };

        self.persist(&candidate)?;
        self.users = candidate;

        info!(mode = %mode, imported = added, "Import complete");
        Ok(added)
    }

    /// Get a reference to the config
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }
}

/// First record whose email matches, compared case-insensitively
fn email_position(users: &[UserRecord], email: &str) -> Option<usize> {
    let needle = email.to_lowercase();
    users
        .iter()
        .position(|user| user.email.to_lowercase() == needle)
}

/// Next free id: one past the current maximum
fn next_id(users: &[UserRecord]) -> Result<u64> {
    let max = users.iter().map(|user| user.id).max().unwrap_or(0);
    max.checked_add(1)
        .ok_or_else(|| StoreError::Internal("user id space exhausted".to_string()))
}

fn apply_patch(record: &mut UserRecord, patch: UserPatch) {
    if let Some(first_name) = patch.first_name {
        record.first_name = first_name;
    }
    if let Some(last_name) = patch.last_name {
        record.last_name = last_name;
    }
    if let Some(email) = patch.email {
        record.email = email;
    }
    if let Some(phone) = patch.phone {
        record.phone = phone;
    }
    if let Some(password) = patch.password {
        record.password = password;
    }
    if let Some(active) = patch.active {
        record.active = active;
    }
}

/// Demo accounts written on first use
fn seed_users() -> Vec<UserRecord> {
    let now = Utc::now();
    vec![
        UserRecord {
            id: 1,
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "john@example.com".to_string(),
            phone: "+15551234567".to_string(),
            password: "password123".to_string(),
            created_at: now,
            last_login: None,
            active: true,
        },
        UserRecord {
            id: 2,
            first_name: "Jane".to_string(),
            last_name: "Smith".to_string(),
            email: "jane@example.com".to_string(),
            phone: "+15559876543".to_string(),
            password: "secret456".to_string(),
            created_at: now,
            last_login: None,
            active: true,
        },
    ]
}

/// Extract the record list from an import payload, wrapped or bare
fn parse_import(payload: &str) -> Result<Vec<UserRecord>> {
    let value: serde_json::Value =
        serde_json::from_str(payload).map_err(|e| StoreError::InvalidFormat(e.to_string()))?;

    let users_value = match value {
        serde_json::Value::Array(_) => value,
        serde_json::Value::Object(mut map) => map
            .remove("users")
            .ok_or_else(|| StoreError::InvalidFormat("missing `users` array".to_string()))?,
        _ => {
            return Err(StoreError::InvalidFormat(
                "expected an object or array".to_string(),
            ))
        }
    };

    serde_json::from_value(users_value).map_err(|e| StoreError::InvalidFormat(e.to_string()))
}
