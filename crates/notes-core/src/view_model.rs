//! View model behind the note list and editor screens.
//!
//! Holds the editor's draft title/content and hands writes off to background
//! tasks so the caller's thread never waits on the store.

use tokio::task::JoinHandle;

use crate::db::{LibSqlNoteDao, NoteDao};
use crate::error::{Error, Result};
use crate::live::LiveQuery;
use crate::models::{Note, NoteId};
use crate::repository::NoteRepository;

/// Message used when a draft is saved with a blank field.
pub const EMPTY_FIELDS_MESSAGE: &str = "Fields cannot be empty";

pub struct NotesViewModel<D = LibSqlNoteDao> {
    repository: NoteRepository<D>,
    all_notes: LiveQuery<Vec<Note>>,
    title: String,
    content: String,
}

impl<D: NoteDao> NotesViewModel<D> {
    pub fn new(repository: NoteRepository<D>) -> Self {
        let all_notes = repository.get_all_notes();
        Self {
            repository,
            all_notes,
            title: String::new(),
            content: String::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn on_title_change(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn on_content_change(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Live list of every note
    pub const fn all_notes(&self) -> &LiveQuery<Vec<Note>> {
        &self.all_notes
    }

    pub fn note_by_id(&self, id: NoteId) -> LiveQuery<Note> {
        self.repository.get_note_by_id(id)
    }

    /// Insert in the background.
    pub fn add_note(&self, note: Note) -> JoinHandle<Result<()>> {
        let repository = self.repository.clone();
        tokio::spawn(async move {
            repository
                .add_note(&note)
                .await
                .map(|_| ())
                .inspect_err(|error| tracing::error!("Failed to add note: {error}"))
        })
    }

    /// Update in the background.
    pub fn update_note(&self, note: Note) -> JoinHandle<Result<()>> {
        let repository = self.repository.clone();
        tokio::spawn(async move {
            repository
                .update_note(&note)
                .await
                .map(|_| ())
                .inspect_err(|error| {
                    tracing::error!(id = %note.id, "Failed to update note: {error}");
                })
        })
    }

    /// Delete in the background.
    pub fn delete_note(&self, note: Note) -> JoinHandle<Result<()>> {
        let repository = self.repository.clone();
        tokio::spawn(async move {
            repository
                .delete_note(&note)
                .await
                .map(|_| ())
                .inspect_err(|error| {
                    tracing::error!(id = %note.id, "Failed to delete note: {error}");
                })
        })
    }

    /// Prepare the editor for `id`.
    ///
    /// An unset id starts a blank draft; otherwise the draft is filled from the
    /// stored note (blank if it no longer exists).
    pub async fn load_draft(&mut self, id: NoteId) -> Result<()> {
        if id.is_unset() {
            self.title.clear();
            self.content.clear();
            return Ok(());
        }

        let note = self.note_by_id(id).snapshot().await?;
        self.title = note.title;
        self.content = note.content;
        Ok(())
    }

    /// Persist the draft as a new note (unset id) or over note `id`.
    ///
    /// Both fields must be non-empty; stored values are trimmed.
    pub fn save_draft(&self, id: NoteId) -> Result<JoinHandle<Result<()>>> {
        if self.title.is_empty() || self.content.is_empty() {
            return Err(Error::InvalidInput(EMPTY_FIELDS_MESSAGE.to_string()));
        }

        let note = Note::with_id(id, self.title.trim(), self.content.trim());
        Ok(if id.is_unset() {
            self.add_note(note)
        } else {
            self.update_note(note)
        })
    }
}
