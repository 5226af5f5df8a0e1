//! Note table definition

use crate::error::Result;
use libsql::Connection;

const CREATE_NOTE_TABLE: &str = "CREATE TABLE IF NOT EXISTS tbl_note (
    id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    note_title TEXT NOT NULL DEFAULT '',
    note_content TEXT NOT NULL DEFAULT ''
)";

/// Create the note table if it does not exist yet.
///
/// There is no versioned migration chain; an existing table is used as is.
pub async fn ensure(conn: &Connection) -> Result<()> {
    conn.execute(CREATE_NOTE_TABLE, ()).await?;
    Ok(())
}
