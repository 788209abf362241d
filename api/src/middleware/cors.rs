//! CORS middleware configuration for cross-origin requests.
//!
//! Development is permissive. Other environments only accept the origins
//! listed in `server.cors.allowed_origins`, or any origin when that list is
//! empty.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use jwsauth_shared::{CorsConfig, Environment};

/// Creates a CORS middleware instance for the given environment
pub fn create_cors(config: &CorsConfig, environment: Environment) -> Cors {
    if environment.is_development() {
        create_development_cors(config.max_age)
    } else {
        create_restricted_cors(config)
    }
}

fn create_development_cors(max_age: usize) -> Cors {
    tracing::info!("Configuring CORS for development environment");

    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .expose_headers(vec![header::WWW_AUTHENTICATE])
        .max_age(max_age)
}

fn create_restricted_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .expose_headers(vec![header::WWW_AUTHENTICATE])
        .max_age(config.max_age);

    if config.allowed_origins.is_empty() {
        tracing::warn!("No CORS origins configured; allowing any origin");
        return cors.allow_any_origin();
    }

    for origin in config.allowed_origins.iter().map(|s| s.trim()) {
        if !origin.is_empty() {
            tracing::info!(origin, "Adding allowed origin");
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}
