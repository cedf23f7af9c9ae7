//! Note payload rules.
//!
//! Bodies are read as raw JSON first so that every problem (missing field,
//! wrong type, rule violation) can be reported per field instead of failing
//! on the first serde error.

use crate::dto::NoteFields;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;
use validator::{Validate, ValidationError, ValidationErrors};

pub const TITLE_MIN_LENGTH: usize = 1;
pub const TITLE_MAX_LENGTH: usize = 255;
pub const CONTENT_MIN_LENGTH: usize = 1;

pub const TITLE_REQUIRED: &str = "Title is required";
pub const TITLE_TOO_LONG: &str = "Title is too long";
pub const CONTENT_REQUIRED: &str = "Content is required";

pub const CODE_REQUIRED: &str = "required";
pub const CODE_TOO_SMALL: &str = "too_small";
pub const CODE_TOO_BIG: &str = "too_big";
pub const CODE_INVALID_TYPE: &str = "invalid_type";

const FIELD_ORDER: [&str; 2] = ["title", "content"];

/// One violated rule, reported back to the caller under `errors`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    pub field: String,
    pub code: String,
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: &str, code: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            code: code.to_string(),
            message: message.to_string(),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum PayloadError {
    /// The body is not JSON at all.
    Malformed,
    /// The body is JSON but breaks the schema.
    Invalid(Vec<FieldIssue>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
}

/// A request shape that can be produced from validated note fields.
pub trait NotePayload: Sized {
    const PRESENCE: Presence;

    /// Called only once `fields` passed every rule for this variant.
    fn from_fields(fields: NoteFields) -> Option<Self>;
}

pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    let len = title.chars().count();
    if len < TITLE_MIN_LENGTH {
        return Err(
            ValidationError::new(CODE_TOO_SMALL).with_message(Cow::Borrowed(TITLE_REQUIRED)),
        );
    }
    if len > TITLE_MAX_LENGTH {
        return Err(
            ValidationError::new(CODE_TOO_BIG).with_message(Cow::Borrowed(TITLE_TOO_LONG)),
        );
    }
    Ok(())
}

pub fn validate_content(content: &str) -> Result<(), ValidationError> {
    if content.chars().count() < CONTENT_MIN_LENGTH {
        return Err(
            ValidationError::new(CODE_TOO_SMALL).with_message(Cow::Borrowed(CONTENT_REQUIRED)),
        );
    }
    Ok(())
}

/// Parse and validate a request body into `T`.
pub fn parse_payload<T: NotePayload>(body: &[u8]) -> Result<T, PayloadError> {
    let value: Value = serde_json::from_slice(body).map_err(|_| PayloadError::Malformed)?;
    validate_value(&value)
}

/// Validate an already-decoded JSON value into `T`.
pub fn validate_value<T: NotePayload>(value: &Value) -> Result<T, PayloadError> {
    let Value::Object(object) = value else {
        return Err(PayloadError::Invalid(vec![FieldIssue::new(
            "",
            CODE_INVALID_TYPE,
            "Expected an object",
        )]));
    };

    let mut issues = Vec::new();
    let fields = NoteFields {
        title: read_text(object, "title", T::PRESENCE, &mut issues)
            .map(|title| title.trim().to_string()),
        content: read_text(object, "content", T::PRESENCE, &mut issues),
    };

    if let Err(errors) = fields.validate() {
        issues.extend(issues_from(&errors));
    }

    if !issues.is_empty() {
        issues.sort_by_key(|issue| field_rank(&issue.field));
        return Err(PayloadError::Invalid(issues));
    }

    T::from_fields(fields).ok_or_else(|| PayloadError::Invalid(Vec::new()))
}

fn read_text(
    object: &Map<String, Value>,
    field: &str,
    presence: Presence,
    issues: &mut Vec<FieldIssue>,
) -> Option<String> {
    match object.get(field) {
        Some(Value::String(text)) => Some(text.clone()),
        Some(_) => {
            issues.push(FieldIssue::new(field, CODE_INVALID_TYPE, type_message(field)));
            None
        }
        None => {
            if presence == Presence::Required {
                issues.push(FieldIssue::new(field, CODE_REQUIRED, required_message(field)));
            }
            None
        }
    }
}

fn issues_from(errors: &ValidationErrors) -> Vec<FieldIssue> {
    let by_field = errors.field_errors();
    FIELD_ORDER
        .iter()
        .filter_map(|field| by_field.get(*field).map(|errs| (*field, errs)))
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| FieldIssue {
                field: field.to_string(),
                code: err.code.to_string(),
                message: err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string()),
            })
        })
        .collect()
}

fn field_rank(field: &str) -> usize {
    FIELD_ORDER
        .iter()
        .position(|f| *f == field)
        .map(|pos| pos + 1)
        .unwrap_or(0)
}

fn required_message(field: &str) -> &'static str {
    match field {
        "title" => TITLE_REQUIRED,
        _ => CONTENT_REQUIRED,
    }
}

fn type_message(field: &str) -> &'static str {
    match field {
        "title" => "Title must be a string",
        _ => "Content must be a string",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::{CreateNoteRequest, UpdateNoteRequest};
    use serde_json::json;

    fn create(value: Value) -> Result<CreateNoteRequest, PayloadError> {
        validate_value(&value)
    }

    fn update(value: Value) -> Result<UpdateNoteRequest, PayloadError> {
        validate_value(&value)
    }

    fn failures(result: Result<impl std::fmt::Debug, PayloadError>) -> Vec<FieldIssue> {
        match result {
            Err(PayloadError::Invalid(issues)) => issues,
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn accepts_valid_note() {
        let note = create(json!({"title": "Valid Title", "content": "Valid content"})).unwrap();
        assert_eq!(note.title, "Valid Title");
        assert_eq!(note.content, "Valid content");
    }

    #[test]
    fn rejects_empty_title() {
        let issues = failures(create(json!({"title": "", "content": "x"})));
        assert_eq!(issues, vec![FieldIssue::new("title", CODE_TOO_SMALL, TITLE_REQUIRED)]);
    }

    #[test]
    fn title_length_bounds() {
        assert!(create(json!({"title": "A", "content": "x"})).is_ok());
        assert!(create(json!({"title": "a".repeat(255), "content": "x"})).is_ok());

        let issues = failures(create(json!({"title": "a".repeat(256), "content": "x"})));
        assert_eq!(issues[0].message, TITLE_TOO_LONG);
        assert_eq!(issues[0].code, CODE_TOO_BIG);
    }

    #[test]
    fn title_length_counts_characters_not_bytes() {
        assert!(create(json!({"title": "é".repeat(255), "content": "x"})).is_ok());
    }

    #[test]
    fn trims_title_before_checking() {
        let note = create(json!({"title": "  Valid Title  ", "content": "c"})).unwrap();
        assert_eq!(note.title, "Valid Title");

        let issues = failures(create(json!({"title": "   ", "content": "c"})));
        assert_eq!(issues[0].message, TITLE_REQUIRED);
    }

    #[test]
    fn content_is_not_trimmed() {
        let note = create(json!({"title": "t", "content": "  spaced\n"})).unwrap();
        assert_eq!(note.content, "  spaced\n");
    }

    #[test]
    fn rejects_empty_content() {
        let issues = failures(create(json!({"title": "t", "content": ""})));
        assert_eq!(issues, vec![FieldIssue::new("content", CODE_TOO_SMALL, CONTENT_REQUIRED)]);
    }

    #[test]
    fn reports_both_fields_in_order() {
        let issues = failures(create(json!({"content": "", "title": ""})));
        let fields: Vec<_> = issues.iter().map(|i| i.field.as_str()).collect();
        assert_eq!(fields, ["title", "content"]);
    }

    #[test]
    fn create_requires_both_fields() {
        let issues = failures(create(json!({"content": "only content"})));
        assert_eq!(issues, vec![FieldIssue::new("title", CODE_REQUIRED, TITLE_REQUIRED)]);

        let issues = failures(create(json!({"title": "only title"})));
        assert_eq!(issues, vec![FieldIssue::new("content", CODE_REQUIRED, CONTENT_REQUIRED)]);
    }

    #[test]
    fn wrong_types_are_reported() {
        let issues = failures(create(json!({"title": 42, "content": null})));
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.code == CODE_INVALID_TYPE));
    }

    #[test]
    fn non_object_body_is_invalid() {
        let issues = failures(create(json!(["title", "content"])));
        assert_eq!(issues[0].field, "");
        assert_eq!(issues[0].code, CODE_INVALID_TYPE);
    }

    #[test]
    fn ignores_unknown_fields() {
        let note = create(json!({"id": 7, "title": "t", "content": "c"})).unwrap();
        assert_eq!(note.title, "t");
    }

    #[test]
    fn update_accepts_any_subset() {
        let empty = update(json!({})).unwrap();
        assert!(empty.title.is_none() && empty.content.is_none());

        let title_only = update(json!({"title": "New"})).unwrap();
        assert_eq!(title_only.title.as_deref(), Some("New"));
        assert!(title_only.content.is_none());

        let content_only = update(json!({"content": "Body"})).unwrap();
        assert_eq!(content_only.content.as_deref(), Some("Body"));
    }

    #[test]
    fn update_still_checks_supplied_fields() {
        let issues = failures(update(json!({"title": ""})));
        assert_eq!(issues[0].message, TITLE_REQUIRED);

        let issues = failures(update(json!({"content": ""})));
        assert_eq!(issues[0].message, CONTENT_REQUIRED);
    }

    #[test]
    fn malformed_json_is_distinguished() {
        let result: Result<CreateNoteRequest, _> = parse_payload(b"{ invalid json }");
        assert_eq!(result.unwrap_err(), PayloadError::Malformed);
    }

    #[test]
    fn rule_constants() {
        assert_eq!(TITLE_MIN_LENGTH, 1);
        assert_eq!(TITLE_MAX_LENGTH, 255);
        assert_eq!(CONTENT_MIN_LENGTH, 1);
    }
}
