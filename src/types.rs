//! Account domain types — UserRecord, NewUser, UserPatch, export snapshots
//!
//! Serializable, cloneable, and cheap to pass around. All types serialize
//! in camelCase to match the persisted JSON layout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User record — full account data as stored in the user collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Unique numeric identifier, assigned `max(existing) + 1`
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    /// Unique across the collection, compared case-insensitively
    pub email: String,
    pub phone: String,
    /// Stored and compared verbatim, no hashing
    pub password: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
    pub active: bool,
}

impl UserRecord {
    /// Full display name
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Payload for creating a new record
///
/// Identifier, timestamps, and the active flag are assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

/// Shallow partial update — `Some` fields overwrite, `None` fields are kept
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password: Option<String>,
    pub active: Option<bool>,
}

/// Export format version written into snapshot metadata
pub const EXPORT_VERSION: &str = "1.0";

/// Snapshot of the entire collection plus export metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSnapshot {
    pub users: Vec<UserRecord>,
    pub metadata: ExportMetadata,
}

/// Metadata attached to an export snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    pub export_date: DateTime<Utc>,
    pub total_users: usize,
    pub version: String,
}

/// Import behavior for an incoming snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportMode {
    /// Snapshot records wholly replace the collection
    Replace,
    /// Only snapshot records with a fresh email are appended
    Merge,
}

impl ImportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Replace => "replace",
            Self::Merge => "merge",
        }
    }
}

impl std::fmt::Display for ImportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
