//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - JWS token signing, expiry and refresh configuration
//! - `duration` - human-readable duration parsing
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server and CORS configuration
//!
//! Configuration is layered: built-in defaults, then an optional
//! `config.<environment>.toml` file, then `JWSAUTH__*` environment variables
//! (`JWSAUTH__AUTH__JWS__REFRESH_WINDOW=12h`).

pub mod auth;
pub mod duration;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

// Re-export commonly used types
pub use auth::{AuthConfig, JwsConfig, UserAccountConfig};
pub use environment::{Environment, LogFormat, LoggingConfig, UnknownEnvironment};
pub use server::{CorsConfig, ServerConfig};

/// Prefix of environment variables overriding configuration values
pub const ENV_PREFIX: &str = "JWSAUTH";

/// Errors raised while assembling the application configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl AppConfig {
    /// Built-in defaults for an environment
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            environment,
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
            logging: LoggingConfig::for_environment(environment),
        }
    }

    /// Load configuration for an explicit environment
    pub fn load_for(
        environment: Environment,
        config_dir: impl AsRef<Path>,
    ) -> Result<Self, ConfigError> {
        let defaults = config::Config::try_from(&Self::for_environment(environment))?;
        let file = config_dir.as_ref().join(environment.config_file());

        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(config::File::from(file).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        let mut app_config: AppConfig = settings.try_deserialize()?;
        app_config.environment = environment;
        app_config.validate()?;
        Ok(app_config)
    }

    /// Check invariants that serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.jws.public_key.trim().is_empty() {
            return Err(ConfigError::Invalid {
                message: "auth.jws.public_key must not be empty".to_string(),
            });
        }
        if self.auth.jws.private_key.trim().is_empty() {
            return Err(ConfigError::Invalid {
                message: "auth.jws.private_key must not be empty".to_string(),
            });
        }
        if self.auth.jws.algorithm.trim().is_empty() {
            return Err(ConfigError::Invalid {
                message: "auth.jws.algorithm must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
