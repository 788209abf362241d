//! Mapping of domain failures onto HTTP responses
//!
//! Authentication failures become 401 with their stable code in `error`, so
//! clients can tell "send a credential" from "refresh" from "log in again".
//! Configuration faults (unreadable keys) are 500 and never reveal details.

use actix_web::{
    http::{header, StatusCode},
    HttpResponse, ResponseError,
};
use thiserror::Error;
use validator::ValidationErrors;

use jwsauth_core::errors::{AuthFailure, DomainError, TokenError};
use jwsauth_shared::{error_codes, ErrorResponse, IntoErrorResponse};

/// Errors returned by handlers and middleware
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Login rejected: unknown user or wrong password
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Invalid request: {0}")]
    Validation(#[from] ValidationErrors),
}

impl From<AuthFailure> for ApiError {
    fn from(failure: AuthFailure) -> Self {
        ApiError::Domain(DomainError::Auth(failure))
    }
}

impl IntoErrorResponse for ApiError {
    fn to_error_response(&self) -> ErrorResponse {
        match self {
            ApiError::Domain(DomainError::Auth(failure)) => {
                ErrorResponse::new(failure.code(), failure.to_string())
            }
            ApiError::Domain(_) => ErrorResponse::new(
                error_codes::INTERNAL_ERROR,
                "An internal error occurred",
            ),
            ApiError::InvalidCredentials => {
                ErrorResponse::new(error_codes::INVALID_OR_EXPIRED, self.to_string())
            }
            ApiError::Validation(errors) => {
                let mut response =
                    ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request body");
                for (field, field_errors) in errors.field_errors() {
                    let codes: Vec<String> =
                        field_errors.iter().map(|e| e.code.to_string()).collect();
                    response = response.add_detail(field.to_string(), codes);
                }
                response
            }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Domain(DomainError::Auth(_)) | ApiError::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Domain(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        match self {
            ApiError::Domain(DomainError::Token(TokenError::KeyLoad { message })) => {
                tracing::error!(%message, "Signing keys unavailable");
            }
            ApiError::Domain(DomainError::Token(error)) => {
                tracing::error!(%error, "Token service failure");
            }
            ApiError::Domain(DomainError::Internal { message }) => {
                tracing::error!(%message, "Internal error");
            }
            _ => {}
        }

        let mut builder = HttpResponse::build(status);
        if status == StatusCode::UNAUTHORIZED {
            builder.insert_header((header::WWW_AUTHENTICATE, "Bearer"));
        }
        builder.json(self.to_error_response())
    }
}
