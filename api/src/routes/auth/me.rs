use actix_web::HttpResponse;

use crate::dto::MeResponse;
use crate::middleware::AuthContext;

/// Handler for GET /api/v1/auth/me
///
/// Requires `JwsAuth`. Returns the identity carried by the bearer token.
pub async fn me(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(MeResponse::from(auth.identity()))
}
