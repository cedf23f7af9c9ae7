use crate::repository::NoteRepository;
use std::sync::Arc;

// ============================================================================
// APPLICATION STATE - Shared by every request
// ============================================================================
/// Cloned into each handler; only the `Arc` is copied.
///
/// The repository owns the connection pool, which is built once at startup
/// and closed on shutdown.
#[derive(Clone)]
pub struct AppState {
    pub notes: Arc<dyn NoteRepository>,
}

impl AppState {
    pub fn new(notes: Arc<dyn NoteRepository>) -> Self {
        Self { notes }
    }
}
