use crate::{
    AppState,
    dto::{CreateNoteRequest, UpdateNoteRequest},
    errors::ApiError,
    extract::{NoteId, ValidJson},
    models::Note,
};
use axum::{Json, extract::State, http::StatusCode};
use tracing::info;

/// GET /notes
pub async fn list_notes(State(state): State<AppState>) -> Result<Json<Vec<Note>>, ApiError> {
    let notes = state
        .notes
        .find_all()
        .await
        .map_err(ApiError::internal("Failed to fetch notes"))?;

    Ok(Json(notes))
}

/// POST /notes
/// Body: { "title": "...", "content": "..." }
pub async fn create_note(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<CreateNoteRequest>,
) -> Result<(StatusCode, Json<Note>), ApiError> {
    const FAILED: &str = "Failed to create note";

    let id = state
        .notes
        .create(payload.into())
        .await
        .map_err(ApiError::internal(FAILED))?;

    let note = state
        .notes
        .find_by_id(id)
        .await
        .map_err(ApiError::internal(FAILED))?
        .ok_or(ApiError::NotFound)?;

    info!(note_id = note.id, "Note created");

    Ok((StatusCode::CREATED, Json(note)))
}

/// GET /notes/{id}
pub async fn get_note(
    State(state): State<AppState>,
    NoteId(id): NoteId,
) -> Result<Json<Note>, ApiError> {
    let note = state
        .notes
        .find_by_id(id)
        .await
        .map_err(ApiError::internal("Failed to fetch note"))?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(note))
}

/// PATCH /notes/{id}
/// Body: { "title"?: "...", "content"?: "..." }
pub async fn update_note(
    State(state): State<AppState>,
    NoteId(id): NoteId,
    ValidJson(payload): ValidJson<UpdateNoteRequest>,
) -> Result<Json<Note>, ApiError> {
    const FAILED: &str = "Failed to update note";

    if !state
        .notes
        .exists(id)
        .await
        .map_err(ApiError::internal(FAILED))?
    {
        return Err(ApiError::NotFound);
    }

    // A delete racing in between the write and the re-read shows up as 404.
    let note = state
        .notes
        .update(id, payload.into())
        .await
        .map_err(ApiError::internal(FAILED))?
        .ok_or(ApiError::NotFound)?;

    info!(note_id = id, "Note updated");

    Ok(Json(note))
}

/// DELETE /notes/{id}
pub async fn delete_note(
    State(state): State<AppState>,
    NoteId(id): NoteId,
) -> Result<StatusCode, ApiError> {
    const FAILED: &str = "Failed to delete note";

    if !state
        .notes
        .exists(id)
        .await
        .map_err(ApiError::internal(FAILED))?
    {
        return Err(ApiError::NotFound);
    }

    state
        .notes
        .delete(id)
        .await
        .map_err(ApiError::internal(FAILED))?;

    info!(note_id = id, "Note deleted");

    Ok(StatusCode::NO_CONTENT)
}
