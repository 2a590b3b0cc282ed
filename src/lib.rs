//! # Account Store
//!
//! User account management over a pluggable key-value backend — CRUD,
//! authentication, session tracking, search, stats, and import/export,
//! persisted as plain JSON.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────┐
//! │              account-store                │
//! ├───────────────┬───────────┬───────────────┤
//! │   validate    │   types   │    config     │
//! │  (pure field  │ (records, │  (key names)  │
//! │    rules)     │ snapshots)│               │
//! ├───────────────┴───────────┴───────────────┤
//! │              AccountStore                  │
//! │  (CRUD, auth, sessions, import/export)    │
//! ├───────────────────────────────────────────┤
//! │           KeyValueBackend                  │
//! │  MemoryBackend │ JsonFileBackend           │
//! └───────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use account_store::{AccountStore, JsonFileBackend, StoreConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = JsonFileBackend::new("/data/accounts")?;
//!     let mut store = AccountStore::open(StoreConfig::new(), Box::new(backend))?;
//!
//!     // Login against the seeded demo account
//!     let user = store.authenticate("john@example.com", "password123")?;
//!     store.set_current_session(&user)?;
//!
//!     // Search and aggregate
//!     let does = store.search("doe");
//!     let stats = store.stats();
//!     println!("{} of {} users active", stats.active, stats.total);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Pluggable Persistence**: In-memory or one-file-per-key JSON backends
//! - **Whole-Collection Writes**: Every mutation persists the full collection atomically
//! - **Case-Insensitive Emails**: Uniqueness and lookups ignore case
//! - **Import/Export**: Versioned JSON snapshots, replace or merge on restore
//! - **Pure Validation**: Field rules usable without a store instance
//! - **Railway Programming**: All operations return `Result<T, StoreError>`

pub mod backend;
pub mod config;
pub mod error;
pub mod store;
pub mod types;
pub mod validate;

// Re-exports for convenience
pub use backend::{JsonFileBackend, KeyValueBackend, MemoryBackend};
pub use config::StoreConfig;
pub use error::{Result, StoreError};
pub use store::{AccountStore, UserStats};
pub use types::{
    ExportMetadata, ExportSnapshot, ImportMode, NewUser, UserPatch, UserRecord, EXPORT_VERSION,
};
pub use validate::{validate_new_user, ValidationIssue, ValidationReport};
