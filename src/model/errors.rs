//! Model error types
//!
//! Error codes:
//! - MODEL_FIELD_TABLE_INVALID (FATAL, entity definition is broken)
//! - MODEL_EMPTY_INPUT (REJECT)
//! - MODEL_VALIDATION_FAILED (REJECT)
//!
//! Validation failures are returned as data. Nothing in the transform path
//! panics on bad input.

use std::fmt;

use thiserror::Error;

/// Severity levels for model errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Input rejected, caller may retry with different data
    Reject,
    /// Entity definition is unusable
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// What a validator expected and what it found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Expected type or condition
    pub expected: String,
    /// Actual value or type found
    pub actual: String,
}

impl Violation {
    pub fn new(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn type_mismatch(expected: impl Into<String>, actual: &serde_json::Value) -> Self {
        Self::new(expected, json_type_name(actual))
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected {}, got {}", self.expected, self.actual)
    }
}

/// Errors raised while declaring a field definition table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldTableError {
    #[error("entity '{entity}' declares field '{field}' more than once")]
    DuplicateField { entity: String, field: String },

    #[error("entity '{entity}' maps fields '{first}' and '{second}' to wire position {position}")]
    DuplicatePosition {
        entity: String,
        position: usize,
        first: String,
        second: String,
    },

    #[error("entity '{entity}' declares no fields")]
    NoFields { entity: String },
}

impl FieldTableError {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        "MODEL_FIELD_TABLE_INVALID"
    }

    /// Field table errors mean the entity type cannot be used at all
    pub fn severity(&self) -> Severity {
        Severity::Fatal
    }
}

/// Validation outcome for a failed call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Nothing to validate, or every item is entirely unset
    #[error("{entity}: input contains no non-empty items")]
    EmptyInput { entity: &'static str },

    /// First validator that rejected a value
    #[error("{entity}[{index}] field '{field}': {details}")]
    FieldViolation {
        entity: &'static str,
        field: &'static str,
        index: usize,
        details: Violation,
    },
}

impl ValidationError {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::EmptyInput { .. } => "MODEL_EMPTY_INPUT",
            ValidationError::FieldViolation { .. } => "MODEL_VALIDATION_FAILED",
        }
    }

    pub fn severity(&self) -> Severity {
        Severity::Reject
    }

    pub fn entity(&self) -> &'static str {
        match self {
            ValidationError::EmptyInput { entity } => entity,
            ValidationError::FieldViolation { entity, .. } => entity,
        }
    }

    /// Offending field, if the failure is tied to one
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::EmptyInput { .. } => None,
            ValidationError::FieldViolation { field, .. } => Some(field),
        }
    }

    /// Zero-based batch index of the offending record
    pub fn index(&self) -> Option<usize> {
        match self {
            ValidationError::EmptyInput { .. } => None,
            ValidationError::FieldViolation { index, .. } => Some(*index),
        }
    }

    pub fn details(&self) -> Option<&Violation> {
        match self {
            ValidationError::EmptyInput { .. } => None,
            ValidationError::FieldViolation { details, .. } => Some(details),
        }
    }
}

/// Result type for validation
pub type ValidationResult = Result<(), ValidationError>;

/// Returns the JSON type name for error messages.
pub fn json_type_name(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;

    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "int"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
