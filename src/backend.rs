//! Key-value persistence backends
//!
//! The store persists two independent entries (the user collection and the
//! session marker) through a [`KeyValueBackend`]. Backends are synchronous:
//! every operation completes or fails before returning.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Durable key-value area holding JSON-encoded values
///
/// Absent keys read as `None`; removing an absent key is a no-op.
pub trait KeyValueBackend {
    /// Read the value stored under `key`
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Write (or overwrite) the value stored under `key`
    fn write(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove the value stored under `key`
    fn remove(&mut self, key: &str) -> Result<()>;
}

// ─── In-Memory Backend ───

/// Ephemeral backend backed by a `HashMap` — for tests and demos
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: HashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

// ─── File Backend ───

/// Durable backend storing one JSON file per key under a base directory
#[derive(Debug)]
pub struct JsonFileBackend {
    base_path: PathBuf,
}

impl JsonFileBackend {
    /// Open (or create) the backing directory
    pub fn new(base_path: impl AsRef<Path>) -> Result<Self> {
        let path = base_path.as_ref().to_path_buf();
        fs::create_dir_all(&path)?;

        Ok(Self { base_path: path })
    }

    fn key_to_path(&self, key: &str) -> PathBuf {
        // Sanitize key and create path
        let sanitized = key.replace(['/', '\\', ':'], "_");
        self.base_path.join(format!("{sanitized}.json"))
    }
}

impl KeyValueBackend for JsonFileBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_to_path(key);

        if !path.exists() {
            return Ok(None);
        }

        Ok(Some(fs::read_to_string(&path)?))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        fs::write(self.key_to_path(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.key_to_path(key);

        if path.exists() {
            fs::remove_file(&path)?;
        }

        Ok(())
    }
}
