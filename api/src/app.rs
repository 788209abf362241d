//! Application state and route table
//!
//! This module builds the shared state from configuration and registers
//! every endpoint on an Actix-web service config.

use actix_web::{web, HttpResponse};
use std::sync::Arc;

use jwsauth_core::{Authenticator, IdentityRepository, SimpleIdentity, TokenError};
use jwsauth_shared::{error_codes, AppConfig, ErrorResponse};

use crate::middleware::JwsAuth;
use crate::repositories::StaticIdentityRepository;
use crate::routes::auth;

/// Application state that holds shared services
pub struct AppState {
    pub authenticator: Arc<Authenticator<SimpleIdentity>>,
    pub identities: Arc<dyn IdentityRepository<Identity = SimpleIdentity>>,
}

impl AppState {
    pub fn new(
        authenticator: Arc<Authenticator<SimpleIdentity>>,
        identities: Arc<dyn IdentityRepository<Identity = SimpleIdentity>>,
    ) -> Self {
        Self {
            authenticator,
            identities,
        }
    }

    /// Wires the authenticator and the configured identity store
    pub fn from_config(config: &AppConfig) -> Result<Self, TokenError> {
        let authenticator = Authenticator::from_jws_config(&config.auth.jws)?;
        let identities = StaticIdentityRepository::from_config(&config.auth.users);
        tracing::info!(
            users = identities.len(),
            refresh_enabled = config.auth.jws.is_refresh_enabled(),
            "Authentication configured"
        );

        Ok(Self::new(Arc::new(authenticator), Arc::new(identities)))
    }
}

/// Registers all routes. The caller adds `web::Data<AppState>` and the
/// outer middleware.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1").service(
                web::scope("/auth")
                    .route("/authenticate", web::post().to(auth::authenticate))
                    .route("/refresh-token", web::post().to(auth::refresh_token))
                    .service(
                        web::resource("/me")
                            .wrap(JwsAuth::new())
                            .route(web::get().to(auth::me)),
                    ),
            ),
        )
        .default_service(web::route().to(not_found));
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "jwsauth-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
