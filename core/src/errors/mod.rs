//! Domain-specific error types and error handling.

mod types;

// Re-export all error types
pub use types::{AuthFailure, TokenError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthFailure),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    /// Returns the authentication failure kind, if this is one
    pub fn auth_failure(&self) -> Option<AuthFailure> {
        match self {
            DomainError::Auth(failure) => Some(*failure),
            _ => None,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_failure_bridge() {
        let error: DomainError = AuthFailure::RefreshExpired.into();
        assert_eq!(error.auth_failure(), Some(AuthFailure::RefreshExpired));
        assert_eq!(error.to_string(), "Expired; user must reauthenticate");
    }

    #[test]
    fn test_token_error_is_not_auth_failure() {
        let error: DomainError = TokenError::KeyLoad {
            message: "missing".to_string(),
        }
        .into();
        assert_eq!(error.auth_failure(), None);
    }
}
