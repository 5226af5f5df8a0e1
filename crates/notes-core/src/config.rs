//! Store configuration.
//!
//! Callers build a `StoreConfig` (or parse one from JSON) and hand it to
//! `Database::open_with` / `NoteRepository::open`. Nothing here reads the
//! environment.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// File name used when no explicit location is configured.
pub const DEFAULT_DB_FILE: &str = "Notes.db";

/// Where the embedded database lives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoreLocation {
    /// A local database file, created on first open
    File { path: PathBuf },
    /// A private in-memory database, discarded when the handle drops
    InMemory,
}

impl Default for StoreLocation {
    fn default() -> Self {
        Self::File {
            path: PathBuf::from(DEFAULT_DB_FILE),
        }
    }
}

/// Configuration for opening the note store.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    pub location: StoreLocation,
}

impl StoreConfig {
    /// Store backed by the file at `path`
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            location: StoreLocation::File { path: path.into() },
        }
    }

    /// Store kept entirely in memory
    pub const fn in_memory() -> Self {
        Self {
            location: StoreLocation::InMemory,
        }
    }

    /// Parse a configuration document.
    pub fn from_json(payload: &str) -> Result<Self> {
        Ok(serde_json::from_str(payload)?)
    }

    /// Database file path, if the store is file-backed
    pub fn path(&self) -> Option<&Path> {
        match &self.location {
            StoreLocation::File { path } => Some(path),
            StoreLocation::InMemory => None,
        }
    }
}
