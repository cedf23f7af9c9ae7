mod requests;
mod responses;

pub use requests::{CreateNoteRequest, NoteFields, UpdateNoteRequest};
pub use responses::{ErrorResponse, HealthResponse};
