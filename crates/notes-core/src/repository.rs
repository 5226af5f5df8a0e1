//! Note repository
//!
//! The single entry point callers use for notes. Every method forwards to the
//! data-access layer unchanged.

use std::sync::Arc;

use crate::config::StoreConfig;
use crate::db::{Database, LibSqlNoteDao, NoteDao};
use crate::error::Result;
use crate::live::LiveQuery;
use crate::models::{Note, NoteId};

/// Façade over a [`NoteDao`]
#[derive(Debug)]
pub struct NoteRepository<D = LibSqlNoteDao> {
    dao: Arc<D>,
}

impl<D> Clone for NoteRepository<D> {
    fn clone(&self) -> Self {
        Self {
            dao: Arc::clone(&self.dao),
        }
    }
}

impl NoteRepository<LibSqlNoteDao> {
    /// Open the configured store and wrap it in a repository
    pub async fn open(config: &StoreConfig) -> Result<Self> {
        let db = Database::open_with(config).await?;
        Ok(Self::new(LibSqlNoteDao::new(db)))
    }
}

impl<D: NoteDao> NoteRepository<D> {
    pub fn new(dao: D) -> Self {
        Self { dao: Arc::new(dao) }
    }

    /// Insert a note; see [`NoteDao::add`] for the conflict policy
    pub async fn add_note(&self, note: &Note) -> Result<Option<NoteId>> {
        self.dao.add(note).await
    }

    pub fn get_all_notes(&self) -> LiveQuery<Vec<Note>> {
        self.dao.observe_all()
    }

    pub fn get_note_by_id(&self, id: NoteId) -> LiveQuery<Note> {
        self.dao.observe_by_id(id)
    }

    pub async fn update_note(&self, note: &Note) -> Result<bool> {
        self.dao.update(note).await
    }

    pub async fn delete_note(&self, note: &Note) -> Result<bool> {
        self.dao.delete(note).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::memory_repository;
    use pretty_assertions::assert_eq;

    #[tokio::test(flavor = "multi_thread")]
    async fn test_groceries_walkthrough() {
        let repo = memory_repository().await;
        let mut all = repo.get_all_notes().subscribe();
        assert_eq!(all.next().await.unwrap().unwrap(), Vec::<Note>::new());

        repo.add_note(&Note::new("Groceries", "Milk, eggs"))
            .await
            .unwrap();
        assert_eq!(
            all.next().await.unwrap().unwrap(),
            vec![Note::with_id(NoteId::new(1), "Groceries", "Milk, eggs")]
        );

        let mut single = repo.get_note_by_id(NoteId::new(1)).subscribe();
        single.next().await.unwrap().unwrap();
        repo.update_note(&Note::with_id(
            NoteId::new(1),
            "Groceries",
            "Milk, eggs, bread",
        ))
        .await
        .unwrap();
        assert_eq!(
            single.next().await.unwrap().unwrap(),
            Note::with_id(NoteId::new(1), "Groceries", "Milk, eggs, bread")
        );
        assert_eq!(
            all.next().await.unwrap().unwrap(),
            vec![Note::with_id(NoteId::new(1), "Groceries", "Milk, eggs, bread")]
        );

        repo.delete_note(&Note::with_id(NoteId::new(1), "Groceries", ""))
            .await
            .unwrap();
        assert_eq!(all.next().await.unwrap().unwrap(), Vec::<Note>::new());
        assert_eq!(single.next().await.unwrap().unwrap(), Note::default());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_added_note_visible_in_both_queries() {
        let repo = memory_repository().await;

        let id = repo
            .add_note(&Note::new("Todo", "Write tests"))
            .await
            .unwrap()
            .unwrap();

        let all = repo.get_all_notes().snapshot().await.unwrap();
        assert_eq!(all, vec![Note::with_id(id, "Todo", "Write tests")]);
        let single = repo.get_note_by_id(id).snapshot().await.unwrap();
        assert_eq!(single, Note::with_id(id, "Todo", "Write tests"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_update_visible_in_live_collection() {
        let repo = memory_repository().await;
        let id = repo
            .add_note(&Note::new("Plan", "old"))
            .await
            .unwrap()
            .unwrap();
        let mut all = repo.get_all_notes().subscribe();
        assert_eq!(
            all.next().await.unwrap().unwrap(),
            vec![Note::with_id(id, "Plan", "old")]
        );

        assert!(repo
            .update_note(&Note::with_id(id, "Plan", "new"))
            .await
            .unwrap());

        assert_eq!(
            all.next().await.unwrap().unwrap(),
            vec![Note::with_id(id, "Plan", "new")]
        );
        assert_eq!(
            repo.get_note_by_id(id).snapshot().await.unwrap(),
            Note::with_id(id, "Plan", "new")
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_duplicate_explicit_id_keeps_first() {
        let repo = memory_repository().await;
        let id = NoteId::new(9);

        repo.add_note(&Note::with_id(id, "First", "a")).await.unwrap();
        let mut all = repo.get_all_notes().subscribe();
        all.next().await.unwrap().unwrap();

        assert_eq!(
            repo.add_note(&Note::with_id(id, "Second", "b"))
                .await
                .unwrap(),
            None
        );
        assert!(!all.has_pending_change());
        assert_eq!(
            repo.get_all_notes().snapshot().await.unwrap(),
            vec![Note::with_id(id, "First", "a")]
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_update_missing_id_does_not_wake_subscribers() {
        let repo = memory_repository().await;
        let id = repo
            .add_note(&Note::new("Title", "body"))
            .await
            .unwrap()
            .unwrap();
        let mut all = repo.get_all_notes().subscribe();
        let before = all.next().await.unwrap().unwrap();

        let changed = repo
            .update_note(&Note::with_id(NoteId::new(id.get() + 1), "x", "y"))
            .await
            .unwrap();

        assert!(!changed);
        assert!(!all.has_pending_change());
        assert_eq!(repo.get_all_notes().snapshot().await.unwrap(), before);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_subscription_sees_writes_from_clones() {
        let repo = memory_repository().await;
        let writer = repo.clone();
        let mut all = repo.get_all_notes().subscribe();
        all.next().await.unwrap().unwrap();

        let handle = tokio::spawn(async move { writer.add_note(&Note::new("a", "b")).await });
        handle.await.unwrap().unwrap();

        assert_eq!(all.next().await.unwrap().unwrap().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_open_from_config() {
        let tmp = tempfile::tempdir().unwrap();
        let config = StoreConfig::file(tmp.path().join("Notes.db"));

        let repo = NoteRepository::open(&config).await.unwrap();
        repo.add_note(&Note::new("Saved", "to file")).await.unwrap();
        drop(repo);

        let reopened = NoteRepository::open(&config).await.unwrap();
        let notes = reopened.get_all_notes().snapshot().await.unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "Saved");
    }
}
