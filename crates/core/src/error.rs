// Central Error Type for the Application

use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Domain error: {0}")]
    Domain(#[from] crate::domain::DomainError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// The domain error carried by this error, if any.
    ///
    /// Callers (presentation, tests) usually only care which queue rule was
    /// violated, not the wrapping layer.
    pub fn as_domain(&self) -> Option<&crate::domain::DomainError> {
        match self {
            AppError::Domain(e) => Some(e),
            _ => None,
        }
    }
}
