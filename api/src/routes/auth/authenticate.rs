use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::app::AppState;
use crate::dto::{AuthToken, AuthenticateRequest};
use crate::handlers::ApiError;

/// Handler for POST /api/v1/auth/authenticate
///
/// Exchanges a username and password for a signed token.
///
/// # Request Body
///
/// ```json
/// {
///     "username": "alice",
///     "password": "wonderland"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "token": "eyJ..." }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Empty username or password
/// - 401 Unauthorized: Unknown user or wrong password (`invalid_or_expired`)
/// - 500 Internal Server Error: Signing key unavailable
pub async fn authenticate(
    state: web::Data<AppState>,
    request: web::Json<AuthenticateRequest>,
) -> Result<HttpResponse, ApiError> {
    request.validate()?;

    let identity = state
        .identities
        .validate_password(&request.username, &request.password)
        .await?
        .ok_or_else(|| {
            tracing::warn!(username = %request.username, "Rejected login");
            ApiError::InvalidCredentials
        })?;

    let token = state.authenticator.issue_token(&identity)?;
    tracing::info!(user_id = identity.id, "User authenticated");

    Ok(HttpResponse::Ok().json(AuthToken::new(token)))
}
