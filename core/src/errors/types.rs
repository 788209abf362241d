//! Token and authentication error types
//!
//! `TokenError` covers key material and codec failures. `AuthFailure` is the
//! closed set of expected, user-facing authentication outcomes; the transport
//! layer maps each kind to its own remediation.

use jwsauth_shared::error_codes;
use thiserror::Error;

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Key source is missing, unreadable or not a PEM key of the expected kind
    #[error("Failed to load key: {message}")]
    KeyLoad { message: String },

    /// Token string does not have the three-segment JWS shape
    #[error("Malformed token: {reason}")]
    MalformedToken { reason: String },

    /// Configured algorithm identifier is not recognised
    #[error("Unsupported algorithm: {algorithm}")]
    UnsupportedAlgorithm { algorithm: String },

    #[error("Token signing failed: {message}")]
    SigningFailed { message: String },

    /// Payload cannot be turned into an identity
    #[error("Invalid token claims: {message}")]
    InvalidClaims { message: String },
}

impl TokenError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        TokenError::MalformedToken {
            reason: reason.into(),
        }
    }

    pub(crate) fn key_load(message: impl Into<String>) -> Self {
        TokenError::KeyLoad {
            message: message.into(),
        }
    }

    /// Check if this error is a fatal configuration error
    pub fn is_key_load(&self) -> bool {
        matches!(self, TokenError::KeyLoad { .. })
    }
}

/// Authentication failure classification
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthFailure {
    /// No credential was supplied
    #[error("Missing auth")]
    Missing,

    /// A credential was supplied but is malformed, forged or expired
    #[error("Invalid or expired token")]
    InvalidOrExpired,

    /// The token is past its refresh window; the user must re-authenticate
    #[error("Expired; user must reauthenticate")]
    RefreshExpired,
}

impl AuthFailure {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            AuthFailure::Missing => error_codes::MISSING_AUTH,
            AuthFailure::InvalidOrExpired => error_codes::INVALID_OR_EXPIRED,
            AuthFailure::RefreshExpired => error_codes::REFRESH_EXPIRED,
        }
    }
}
