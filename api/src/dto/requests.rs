use crate::{
    models::{NewNote, NoteChanges},
    validation::{NotePayload, Presence, validate_content, validate_title},
};
use serde::Serialize;
use validator::Validate;

/// Fields of a note body after the JSON shape has been checked.
///
/// Both request variants are validated through this struct; a `None`
/// field is simply not checked.
#[derive(Debug, Default, Validate)]
pub struct NoteFields {
    #[validate(custom(function = "validate_title"))]
    pub title: Option<String>,
    #[validate(custom(function = "validate_content"))]
    pub content: Option<String>,
}

/// POST /notes
#[derive(Debug, Clone, Serialize)]
pub struct CreateNoteRequest {
    pub title: String,
    pub content: String,
}

impl NotePayload for CreateNoteRequest {
    const PRESENCE: Presence = Presence::Required;

    fn from_fields(fields: NoteFields) -> Option<Self> {
        Some(Self {
            title: fields.title?,
            content: fields.content?,
        })
    }
}

impl From<CreateNoteRequest> for NewNote {
    fn from(request: CreateNoteRequest) -> Self {
        Self {
            title: request.title,
            content: request.content,
        }
    }
}

/// PATCH /notes/{id}
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateNoteRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl NotePayload for UpdateNoteRequest {
    const PRESENCE: Presence = Presence::Optional;

    fn from_fields(fields: NoteFields) -> Option<Self> {
        Some(Self {
            title: fields.title,
            content: fields.content,
        })
    }
}

impl From<UpdateNoteRequest> for NoteChanges {
    fn from(request: UpdateNoteRequest) -> Self {
        Self {
            title: request.title,
            content: request.content,
        }
    }
}
