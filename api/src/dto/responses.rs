use crate::validation::FieldIssue;
use serde::{Deserialize, Serialize};

/// Body of every non-2xx response: either a single `error` string or a
/// list of field `errors`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldIssue>,
}

impl ErrorResponse {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            errors: Vec::new(),
        }
    }

    pub fn issues(errors: Vec<FieldIssue>) -> Self {
        Self {
            error: None,
            errors,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: i64,
}
