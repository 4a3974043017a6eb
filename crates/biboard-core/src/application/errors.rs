//! Application layer errors
//!
//! Error types for application-level operations.

use std::fmt;

use crate::error::Error;

/// Application layer error types
#[derive(Debug)]
pub enum ApplicationError {
    /// Validation error with field and message
    Validation { field: String, message: String },
    /// Domain error wrapper
    Domain(Error),
}

impl ApplicationError {
    /// Create a validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Wrap a domain error
    pub fn domain(error: Error) -> Self {
        Self::Domain(error)
    }

    /// Field the error refers to, for validation errors
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

impl fmt::Display for ApplicationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation { field, message } => {
                write!(f, "Validation error for '{}': {}", field, message)
            }
            Self::Domain(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ApplicationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            _ => None,
        }
    }
}

impl From<Error> for ApplicationError {
    fn from(error: Error) -> Self {
        Self::Domain(error)
    }
}

/// Result type for application operations
pub type AppResult<T> = Result<T, ApplicationError>;
