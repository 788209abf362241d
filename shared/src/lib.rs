//! Shared configuration and response types for the JwsAuth server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types and the layered configuration loader
//! - Error response structures shared by the transport layer

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, ConfigError, CorsConfig, Environment, JwsConfig, LogFormat,
    LoggingConfig, ServerConfig, UnknownEnvironment, UserAccountConfig,
};
pub use errors::{error_codes, ErrorResponse, IntoErrorResponse};
