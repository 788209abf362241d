use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

use jwsauth_api::{app, middleware, telemetry, AppState};
use jwsauth_shared::{AppConfig, Environment};

const CONFIG_DIR_VAR: &str = "JWSAUTH_CONFIG_DIR";

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env();
    dotenvy::from_filename(environment.env_file()).ok();
    dotenvy::dotenv().ok();

    let config_dir = std::env::var(CONFIG_DIR_VAR).unwrap_or_else(|_| String::from("config"));
    let config = AppConfig::load_for(environment, &config_dir)
        .with_context(|| format!("failed to load configuration from {}", config_dir))?;

    telemetry::init_tracing(&config.logging)
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to initialise tracing")?;

    tracing::info!(%environment, "Starting JwsAuth API Server");

    let state = AppState::from_config(&config).context("invalid token configuration")?;
    state
        .authenticator
        .token_service()
        .preload()
        .context("failed to load signing keys")?;
    let state = web::Data::new(state);

    let bind_address = config.server.bind_address();
    let cors_config = config.server.cors.clone();
    tracing::info!(%bind_address, "Server will bind");

    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::create_cors(&cors_config, environment))
            .wrap(TracingLogger::default())
            .configure(app::configure_routes)
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await
        .context("server terminated with an error")
}
