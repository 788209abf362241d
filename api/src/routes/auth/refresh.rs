use actix_web::{web, HttpRequest, HttpResponse};

use jwsauth_core::{AuthFailure, Identity};

use crate::app::AppState;
use crate::dto::AuthToken;
use crate::handlers::ApiError;
use crate::middleware::bearer_credential;

/// Handler for POST /api/v1/auth/refresh-token
///
/// Exchanges an expired (or still valid) token for a new one, provided it
/// was originally issued within the refresh window. The credential is read
/// from the `Authorization: Bearer` header. The new token's claims come
/// from the identity store's current record; its `iat` stays that of the
/// original login.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "token": "eyJ..." }
/// ```
///
/// ## Errors
/// - 401 Unauthorized `missing`: No bearer credential
/// - 401 Unauthorized `invalid_or_expired`: Malformed or forged token, or
///   the user no longer exists
/// - 401 Unauthorized `refresh_expired`: Outside the refresh window
/// - 500 Internal Server Error: Key material unavailable
pub async fn refresh_token(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let credential = bearer_credential(&req);
    let stale = state
        .authenticator
        .resolve_refreshable(credential.as_deref())?;

    let current = state.identities.reload(&stale).await?.ok_or_else(|| {
        tracing::warn!(user_id = stale.id, "Refresh for identity no longer in store");
        ApiError::from(AuthFailure::InvalidOrExpired)
    })?;

    let token = state
        .authenticator
        .reissue(&current, stale.auth_key_issue_time())?;
    tracing::info!(user_id = current.id, "Token refreshed");

    Ok(HttpResponse::Ok().json(AuthToken::new(token)))
}
