//! Typed client for the notes API with the read cache the web UI uses.
//!
//! Reads are cached per [`CacheKey`] and retried on transport errors and
//! 5xx responses; mutations are sent once and invalidate the entries they
//! affect.

mod cache;

pub use cache::{CacheKey, Cached, GC_TIME, QueryCache, STALE_TIME};

use crate::{
    dto::{CreateNoteRequest, ErrorResponse, UpdateNoteRequest},
    models::Note,
};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use thiserror::Error;
use tokio::time::{Duration, sleep};
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server responded with {status}")]
    Api {
        status: StatusCode,
        body: ErrorResponse,
    },
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Transport(e) => e.status(),
            ClientError::Api { status, .. } => Some(*status),
        }
    }

    fn is_retryable(&self) -> bool {
        match self {
            ClientError::Transport(_) => true,
            ClientError::Api { status, .. } => status.is_server_error(),
        }
    }
}

/// Exponential backoff for failed reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (0-based).
    pub fn delay(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt))
            .min(self.max_delay)
    }
}

#[derive(Clone)]
pub struct NotesClient {
    http: reqwest::Client,
    base_url: String,
    cache: Arc<QueryCache>,
    retry: RetryPolicy,
}

impl NotesClient {
    /// `base_url` is the server root, e.g. `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cache: Arc::new(QueryCache::default()),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_cache(mut self, cache: QueryCache) -> Self {
        self.cache = Arc::new(cache);
        self
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub async fn list_notes(&self) -> Result<Vec<Note>, ClientError> {
        if let Some(Cached::List(notes)) = self.cache.fresh(CacheKey::NoteList) {
            debug!("Serving note list from cache");
            return Ok(notes);
        }

        let notes: Vec<Note> = self.read(|| self.http.get(self.url("/notes"))).await?;
        self.cache.store(CacheKey::NoteList, Cached::List(notes.clone()));
        Ok(notes)
    }

    pub async fn get_note(&self, id: i64) -> Result<Note, ClientError> {
        let key = CacheKey::Note(id);
        if let Some(Cached::Note(note)) = self.cache.fresh(key) {
            debug!(note_id = id, "Serving note from cache");
            return Ok(note);
        }

        let path = format!("/notes/{id}");
        let note: Note = self.read(|| self.http.get(self.url(&path))).await?;
        self.cache.store(key, Cached::Note(note.clone()));
        Ok(note)
    }

    pub async fn create_note(
        &self,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Note, ClientError> {
        let body = CreateNoteRequest {
            title: title.into(),
            content: content.into(),
        };
        let response = self.http.post(self.url("/notes")).json(&body).send().await?;
        let note: Note = check(response).await?.json().await?;

        self.cache.invalidate(CacheKey::NoteList);
        Ok(note)
    }

    pub async fn update_note(
        &self,
        id: i64,
        changes: UpdateNoteRequest,
    ) -> Result<Note, ClientError> {
        let path = format!("/notes/{id}");
        let response = self.http.patch(self.url(&path)).json(&changes).send().await?;
        let note: Note = check(response).await?.json().await?;

        self.cache.invalidate(CacheKey::NoteList);
        self.cache.invalidate(CacheKey::Note(id));
        Ok(note)
    }

    pub async fn delete_note(&self, id: i64) -> Result<(), ClientError> {
        let path = format!("/notes/{id}");
        let response = self.http.delete(self.url(&path)).send().await?;
        check(response).await?;

        self.cache.invalidate(CacheKey::NoteList);
        self.cache.remove(CacheKey::Note(id));
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read<T, F>(&self, request: F) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        F: Fn() -> RequestBuilder,
    {
        let mut attempt = 0;
        loop {
            let result = match request().send().await {
                Ok(response) => match check(response).await {
                    Ok(response) => response.json::<T>().await.map_err(ClientError::from),
                    Err(e) => Err(e),
                },
                Err(e) => Err(ClientError::from(e)),
            };

            match result {
                Err(e) if e.is_retryable() && attempt < self.retry.max_retries => {
                    let delay = self.retry.delay(attempt);
                    attempt += 1;
                    warn!(attempt, error = %e, "Read failed, retrying in {:?}", delay);
                    sleep(delay).await;
                }
                other => return other,
            }
        }
    }
}

/// Turn a non-2xx response into `ClientError::Api`.
async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.json::<ErrorResponse>().await.unwrap_or_default();
    Err(ClientError::Api { status, body })
}
