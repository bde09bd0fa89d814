//! Domain-specific error types and error handling.

mod types;

// Re-export all error types
pub use types::{AuthError, TokenError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    /// Shorthand for wrapping an infrastructure failure
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether this error means the session is gone and the caller must
    /// authenticate again, as opposed to a temporary failure that is safe
    /// to retry.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(
            self,
            DomainError::Token(
                TokenError::InvalidRefreshToken
                    | TokenError::ReusedRefreshToken
                    | TokenError::RevokedRefreshToken
                    | TokenError::ExpiredRefreshToken
                    | TokenError::InvalidAccessToken
            )
        )
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
