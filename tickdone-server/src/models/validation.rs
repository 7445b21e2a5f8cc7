//! Validation error types

use std::fmt;

/// Validation error for request input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Task name is shorter than the minimum once trimmed
    TaskNameTooShort { min: usize },

    /// Value doesn't parse into the expected shape (e.g. a non-numeric id)
    InvalidFormat { field: &'static str, reason: &'static str },
}

impl ValidationError {
    /// Machine-readable error code returned in the `error` body field.
    pub fn code(&self) -> &'static str {
        match self {
            Self::TaskNameTooShort { .. } => "TaskNameTooShort",
            Self::InvalidFormat { .. } => "InvalidFormat",
        }
    }

    /// Name of the offending input field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::TaskNameTooShort { .. } => "TaskName",
            Self::InvalidFormat { field, .. } => field,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TaskNameTooShort { min } => {
                write!(f, "Task must be at least {} characters long.", min)
            }
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
        }
    }
}

impl std::error::Error for ValidationError {}
