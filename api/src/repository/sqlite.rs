use super::{NoteRepository, RepoError};
use crate::models::{NewNote, Note, NoteChanges};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

const SELECT_NOTE: &str = "SELECT id, title, content, created_at, updated_at FROM notes";

pub struct SqliteNoteRepository {
    pool: SqlitePool,
}

impl SqliteNoteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NoteRepository for SqliteNoteRepository {
    async fn find_all(&self) -> Result<Vec<Note>, RepoError> {
        let notes = sqlx::query_as::<_, Note>(&format!(
            "{SELECT_NOTE} ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(notes)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Note>, RepoError> {
        let note = sqlx::query_as::<_, Note>(&format!("{SELECT_NOTE} WHERE id = ? LIMIT 1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(note)
    }

    async fn create(&self, note: NewNote) -> Result<i64, RepoError> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO notes (title, content, created_at, updated_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&note.title)
        .bind(&note.content)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }

    async fn update(&self, id: i64, changes: NoteChanges) -> Result<Option<Note>, RepoError> {
        sqlx::query(
            "UPDATE notes SET title = COALESCE(?, title), content = COALESCE(?, content), \
             updated_at = ? WHERE id = ?",
        )
        .bind(changes.title)
        .bind(changes.content)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id).await
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM notes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), RepoError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
