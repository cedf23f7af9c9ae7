#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode},
};
use notes_api::{
    AppState, app, db,
    models::{NewNote, Note, NoteChanges},
    repository::{NoteRepository, RepoError, SqliteNoteRepository},
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Router backed by a private in-memory database.
pub async fn test_app() -> Router {
    let pool = db::connect_in_memory()
        .await
        .expect("in-memory database should open");
    app(AppState::new(Arc::new(SqliteNoteRepository::new(pool))))
}

/// Router whose store fails every call.
pub fn failing_app() -> Router {
    app(AppState::new(Arc::new(FailingRepository)))
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<&str>,
) -> (StatusCode, Value) {
    let body = match body {
        Some(text) => Body::from(text.to_string()),
        None => Body::empty(),
    };
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .expect("request");

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, json)
}

pub async fn create(app: &Router, title: &str, content: &str) -> Value {
    let body = serde_json::json!({ "title": title, "content": content }).to_string();
    let (status, json) = send(app, Method::POST, "/notes", Some(&body)).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {json}");
    json
}

pub struct FailingRepository;

fn down() -> RepoError {
    RepoError::Database(sqlx::Error::PoolClosed)
}

#[async_trait]
impl NoteRepository for FailingRepository {
    async fn find_all(&self) -> Result<Vec<Note>, RepoError> {
        Err(down())
    }

    async fn find_by_id(&self, _id: i64) -> Result<Option<Note>, RepoError> {
        Err(down())
    }

    async fn create(&self, _note: NewNote) -> Result<i64, RepoError> {
        Err(down())
    }

    async fn update(&self, _id: i64, _changes: NoteChanges) -> Result<Option<Note>, RepoError> {
        Err(down())
    }

    async fn delete(&self, _id: i64) -> Result<(), RepoError> {
        Err(down())
    }

    async fn ping(&self) -> Result<(), RepoError> {
        Err(down())
    }
}
