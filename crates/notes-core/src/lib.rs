//! notes-core - Core library for Notes
//!
//! This crate contains the note model, the embedded database layer, the
//! repository façade and the live query plumbing that a notes UI builds on.

pub mod config;
pub mod db;
pub mod error;
pub mod live;
pub mod models;
pub mod repository;
pub mod view_model;

#[cfg(test)]
mod test_support;

pub use config::{StoreConfig, StoreLocation};
pub use error::{Error, Result};
pub use live::{LiveQuery, Subscription};
pub use models::{Note, NoteId};
pub use repository::NoteRepository;
pub use view_model::NotesViewModel;
