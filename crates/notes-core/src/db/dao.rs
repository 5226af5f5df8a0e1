//! Note data-access operations

use std::future::Future;
use std::sync::Arc;

use libsql::{params, Row, Value};
use tokio::sync::Mutex;

use super::Database;
use crate::error::Result;
use crate::live::{InvalidationTracker, LiveQuery};
use crate::models::{Note, NoteId};

/// Primitive note operations against the embedded store (async)
///
/// Conflict policy: inserting an id that already exists is silently ignored.
/// Updating or deleting an id that does not exist is a no-op. Neither case is
/// an error; the return value reports whether a row was touched.
pub trait NoteDao: Send + Sync + 'static {
    /// Insert a note. An unset id lets the store assign one.
    ///
    /// Returns the id of the inserted row, or `None` if the insert was
    /// ignored because a note with that id already exists.
    fn add(&self, note: &Note) -> impl Future<Output = Result<Option<NoteId>>> + Send;

    /// Overwrite title and content of the note with `note.id`
    fn update(&self, note: &Note) -> impl Future<Output = Result<bool>> + Send;

    /// Remove the note with `note.id`
    fn delete(&self, note: &Note) -> impl Future<Output = Result<bool>> + Send;

    /// Every note, in store order
    fn all(&self) -> impl Future<Output = Result<Vec<Note>>> + Send;

    /// The note with `id`, if any
    fn find(&self, id: NoteId) -> impl Future<Output = Result<Option<Note>>> + Send;

    /// Live view of every note
    fn observe_all(&self) -> LiveQuery<Vec<Note>>;

    /// Live view of a single note; emits `Note::default()` while absent
    fn observe_by_id(&self, id: NoteId) -> LiveQuery<Note>;
}

/// libSQL implementation of `NoteDao`
#[derive(Clone, Debug)]
pub struct LibSqlNoteDao {
    db: Arc<Mutex<Database>>,
    tracker: InvalidationTracker,
}

impl LibSqlNoteDao {
    /// Create a data-access layer owning the given database
    pub fn new(db: Database) -> Self {
        Self::shared(Arc::new(Mutex::new(db)))
    }

    /// Create a data-access layer over an already shared database
    pub fn shared(db: Arc<Mutex<Database>>) -> Self {
        Self {
            db,
            tracker: InvalidationTracker::new(),
        }
    }

    /// Tracker woken by every write that changed rows
    pub const fn tracker(&self) -> &InvalidationTracker {
        &self.tracker
    }

    fn parse_note(row: &Row) -> Result<Note> {
        Ok(Note {
            id: row.get::<i64>(0)?.into(),
            title: row.get(1)?,
            content: row.get(2)?,
        })
    }
}

impl NoteDao for LibSqlNoteDao {
    async fn add(&self, note: &Note) -> Result<Option<NoteId>> {
        let id = if note.id.is_unset() {
            Value::Null
        } else {
            Value::Integer(note.id.get())
        };

        let assigned = {
            let db = self.db.lock().await;
            let conn = db.connection();
            let inserted = conn
                .execute(
                    "INSERT OR IGNORE INTO tbl_note (id, note_title, note_content) VALUES (?1, ?2, ?3)",
                    params![id, note.title.clone(), note.content.clone()],
                )
                .await?;
            (inserted > 0).then(|| NoteId::new(conn.last_insert_rowid()))
        };

        match assigned {
            Some(id) => {
                tracing::debug!(%id, "Inserted note");
                self.tracker.invalidate();
            }
            None => tracing::debug!(id = %note.id, "Ignored insert of existing note"),
        }
        Ok(assigned)
    }

    async fn update(&self, note: &Note) -> Result<bool> {
        let rows = {
            let db = self.db.lock().await;
            db.connection()
                .execute(
                    "UPDATE tbl_note SET note_title = ?1, note_content = ?2 WHERE id = ?3",
                    params![note.title.clone(), note.content.clone(), note.id.get()],
                )
                .await?
        };

        if rows == 0 {
            tracing::debug!(id = %note.id, "Update matched no note");
            return Ok(false);
        }
        tracing::debug!(id = %note.id, "Updated note");
        self.tracker.invalidate();
        Ok(true)
    }

    async fn delete(&self, note: &Note) -> Result<bool> {
        let rows = {
            let db = self.db.lock().await;
            db.connection()
                .execute("DELETE FROM tbl_note WHERE id = ?1", params![note.id.get()])
                .await?
        };

        if rows == 0 {
            tracing::debug!(id = %note.id, "Delete matched no note");
            return Ok(false);
        }
        tracing::debug!(id = %note.id, "Deleted note");
        self.tracker.invalidate();
        Ok(true)
    }

    async fn all(&self) -> Result<Vec<Note>> {
        let db = self.db.lock().await;
        let mut rows = db
            .connection()
            .query("SELECT id, note_title, note_content FROM tbl_note", ())
            .await?;

        let mut notes = Vec::new();
        while let Some(row) = rows.next().await? {
            notes.push(Self::parse_note(&row)?);
        }
        Ok(notes)
    }

    async fn find(&self, id: NoteId) -> Result<Option<Note>> {
        let db = self.db.lock().await;
        let mut rows = db
            .connection()
            .query(
                "SELECT id, note_title, note_content FROM tbl_note WHERE id = ?1",
                params![id.get()],
            )
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Some(Self::parse_note(&row)?)),
            None => Ok(None),
        }
    }

    fn observe_all(&self) -> LiveQuery<Vec<Note>> {
        let dao = self.clone();
        LiveQuery::new(&self.tracker, move || {
            let dao = dao.clone();
            async move { dao.all().await }
        })
    }

    fn observe_by_id(&self, id: NoteId) -> LiveQuery<Note> {
        let dao = self.clone();
        LiveQuery::new(&self.tracker, move || {
            let dao = dao.clone();
            async move { Ok(dao.find(id).await?.unwrap_or_default()) }
        })
    }
}
