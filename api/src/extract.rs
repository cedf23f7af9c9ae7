use crate::{
    errors::ApiError,
    validation::{NotePayload, parse_payload},
};
use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};

/// The `{id}` path segment of a note route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteId(pub i64);

impl<S> FromRequestParts<S> for NoteId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::InvalidId)?;

        parse_note_id(&raw).map(NoteId).ok_or(ApiError::InvalidId)
    }
}

/// Read the leading integer of `raw`.
///
/// Surrounding whitespace and a sign are allowed and anything after the
/// digits is ignored, so `"12abc"` and `"1.5"` both resolve. No digits, or a
/// value outside `i64`, is rejected.
pub fn parse_note_id(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let (negative, rest) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..digits_end];
    if digits.is_empty() {
        return None;
    }

    if negative {
        format!("-{digits}").parse().ok()
    } else {
        digits.parse().ok()
    }
}

/// A request body parsed as JSON and validated into `T`.
///
/// The content type is not checked; any body that parses as JSON is
/// accepted.
#[derive(Debug)]
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: NotePayload + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|_| ApiError::MalformedBody)?;

        Ok(ValidJson(parse_payload(&body)?))
    }
}
