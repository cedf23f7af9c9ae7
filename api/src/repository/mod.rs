//! Data access for the `notes` table.

mod sqlite;

pub use sqlite::SqliteNoteRepository;

use crate::models::{NewNote, Note, NoteChanges};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Storage operations the HTTP layer relies on.
///
/// Failures are never swallowed here; "not found" is a value, not an error.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// All notes, newest first.
    async fn find_all(&self) -> Result<Vec<Note>, RepoError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Note>, RepoError>;

    /// Insert a note and return the id assigned by the store.
    async fn create(&self, note: NewNote) -> Result<i64, RepoError>;

    /// Apply the supplied fields, refresh `updated_at` and re-read the row.
    ///
    /// The write and the re-read are separate statements; a concurrent
    /// delete in between yields `Ok(None)`.
    async fn update(&self, id: i64, changes: NoteChanges) -> Result<Option<Note>, RepoError>;

    /// Remove the row. Deleting a missing id is not an error.
    async fn delete(&self, id: i64) -> Result<(), RepoError>;

    async fn exists(&self, id: i64) -> Result<bool, RepoError> {
        Ok(self.find_by_id(id).await?.is_some())
    }

    /// Round-trip to the store, used by the health check.
    async fn ping(&self) -> Result<(), RepoError>;
}
