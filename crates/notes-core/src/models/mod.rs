//! Data models for Notes

mod note;

pub use note::{Note, NoteId};
