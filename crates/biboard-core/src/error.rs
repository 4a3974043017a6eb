//! Error types for Biboard

use thiserror::Error;

/// Result type alias using Biboard's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Biboard error types with helpful messages and suggestions
#[derive(Error, Debug)]
pub enum Error {
    // Entity errors (E001-E099)
    #[error("Project '{0}' not found. Run `list` to see all projects.")]
    ProjectNotFound(String),

    #[error("Unknown status '{0}'. Valid statuses: Stopped, In Progress, In Development, Finalizing.")]
    InvalidStatus(String),

    // Input errors (E100-E199)
    #[error("Invalid date '{0}'. Use YYYY-MM-DD or DD/MM/YYYY.")]
    InvalidDate(String),

    // Session errors (E200-E299)
    #[error("Incorrect username or password")]
    AuthenticationFailed,

    #[error("Not logged in. Sign in as the operator to work with projects.")]
    NotAuthenticated,
}

impl Error {
    /// Get error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            Self::ProjectNotFound(_) => "E001",
            Self::InvalidStatus(_) => "E002",
            Self::InvalidDate(_) => "E100",
            Self::AuthenticationFailed => "E200",
            Self::NotAuthenticated => "E201",
        }
    }

    /// Get suggestion for how to fix this error
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::ProjectNotFound(_) => Some("list".to_string()),
            Self::InvalidStatus(_) => Some("statuses".to_string()),
            Self::AuthenticationFailed => {
                Some("biboard config get operator.username".to_string())
            }
            _ => None,
        }
    }
}
