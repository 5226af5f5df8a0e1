//! Database layer for Notes

mod connection;
mod dao;
mod schema;

pub use connection::Database;
pub use dao::{LibSqlNoteDao, NoteDao};
