//! Error types for Dayflow.

use serde::Serialize;
use thiserror::Error;

/// One field-level validation problem, surfaced verbatim in 400 bodies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Error, Debug)]
pub enum DayflowError {
    #[error("invalid {kind} draft")]
    Validation {
        kind: &'static str,
        errors: Vec<FieldError>,
    },

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: i64 },

    /// Generative capability failed or returned an unusable shape. Never
    /// mapped to an HTTP error: callers convert it to a fallback response.
    #[error("upstream generation error: {0}")]
    Upstream(String),

    /// Store-level failure while writing a validated draft. Counted in the
    /// persistence tally, never aborts a batch.
    #[error("persistence error: {0}")]
    Persistence(String),
}

impl DayflowError {
    pub fn validation(kind: &'static str, errors: Vec<FieldError>) -> Self {
        Self::Validation { kind, errors }
    }

    pub fn not_found(kind: &'static str, id: i64) -> Self {
        Self::NotFound { kind, id }
    }

    /// HTTP status this error maps to at the route boundary. Upstream and
    /// persistence errors intentionally have no non-200 mapping.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Validation { .. } => 400,
            Self::NotFound { .. } => 404,
            Self::Upstream(_) | Self::Persistence(_) => 200,
        }
    }
}
