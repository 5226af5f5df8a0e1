//! Shared helpers for unit tests

use crate::db::{Database, LibSqlNoteDao};
use crate::repository::NoteRepository;

/// Route `tracing` output to the test harness; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub async fn memory_dao() -> LibSqlNoteDao {
    init_tracing();
    LibSqlNoteDao::new(Database::open_in_memory().await.unwrap())
}

pub async fn memory_repository() -> NoteRepository {
    NoteRepository::new(memory_dao().await)
}
