//! Error types for account-store — Railway Programming
//!
//! All operations return `Result<T, StoreError>`.
//! No panics, no unwraps in production code paths.

use thiserror::Error;

/// Unified error type for all account store operations
#[derive(Error, Debug)]
pub enum StoreError {
    // ─── Lookup & Uniqueness Errors ───

    #[error("Duplicate email: {0}")]
    DuplicateEmail(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    // ─── Authentication Errors ───

    #[error("Account disabled: {0}")]
    AccountDisabled(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    // ─── Import Errors ───

    #[error("Invalid import payload: {0}")]
    InvalidFormat(String),

    // ─── Infrastructure Errors ───

    #[error("Storage failure: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Result type alias for account store operations
pub type Result<T> = std::result::Result<T, StoreError>;
