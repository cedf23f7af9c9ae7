use crate::{
    dto::ErrorResponse,
    repository::RepoError,
    validation::{FieldIssue, PayloadError},
};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

pub const INVALID_ID: &str = "Invalid note Id";
pub const MALFORMED_BODY: &str = "Invalid JSON in request body";
pub const NOT_FOUND: &str = "Note not found";

#[derive(Debug)]
pub enum ApiError {
    InvalidId,
    MalformedBody,
    ValidationFailed(Vec<FieldIssue>),
    NotFound,
    /// Storage failure. The message is what the client sees, the cause is
    /// only logged.
    InternalError(&'static str, RepoError),
}

impl ApiError {
    /// Wrap a repository failure with the message shown to clients.
    pub fn internal(message: &'static str) -> impl FnOnce(RepoError) -> ApiError {
        move |cause| ApiError::InternalError(message, cause)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidId | ApiError::MalformedBody | ApiError::ValidationFailed(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::InternalError(..) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<PayloadError> for ApiError {
    fn from(err: PayloadError) -> Self {
        match err {
            PayloadError::Malformed => ApiError::MalformedBody,
            PayloadError::Invalid(issues) => ApiError::ValidationFailed(issues),
        }
    }
}

/// The one place where error kinds turn into status codes and bodies.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::InvalidId => ErrorResponse::message(INVALID_ID),
            ApiError::MalformedBody => ErrorResponse::message(MALFORMED_BODY),
            ApiError::ValidationFailed(issues) => ErrorResponse::issues(issues),
            ApiError::NotFound => ErrorResponse::message(NOT_FOUND),
            ApiError::InternalError(message, cause) => {
                error!(cause = %cause, "{}", message);
                ErrorResponse::message(message)
            }
        };

        (status, Json(body)).into_response()
    }
}
