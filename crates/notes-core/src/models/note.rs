//! Note model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a note, assigned by the store on insert
///
/// `0` means the note has not been persisted yet.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NoteId(i64);

impl NoteId {
    /// Placeholder id carried by notes that were never inserted
    pub const UNSET: Self = Self(0);

    /// Wrap a raw row id
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw row id
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Whether this is the "not yet persisted" placeholder
    pub const fn is_unset(self) -> bool {
        self.0 == 0
    }
}

impl From<i64> for NoteId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NoteId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// A note in the system
///
/// The default value is the empty record that live single-note queries emit
/// when nothing matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Store-assigned identifier (`0` until inserted)
    #[serde(default)]
    pub id: NoteId,
    /// Short heading
    #[serde(default)]
    pub title: String,
    /// Body text
    #[serde(default)]
    pub content: String,
}

impl Note {
    /// Compose a new, not yet persisted note
    #[must_use]
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::with_id(NoteId::UNSET, title, content)
    }

    /// Build a note addressing an existing record
    #[must_use]
    pub fn with_id(id: NoteId, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
        }
    }

    /// Whether the note carries a store-assigned id
    pub const fn is_persisted(&self) -> bool {
        !self.id.is_unset()
    }
}
