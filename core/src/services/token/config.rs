//! Configuration for the token service

use jsonwebtoken::Algorithm;
use std::str::FromStr;
use std::time::Duration;

use jwsauth_shared::config::JwsConfig;

use super::key_manager::{KeyProvider, KeySource};
use crate::errors::TokenError;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWS signing algorithm
    pub algorithm: Algorithm,
    /// How long an issued token authenticates; `None` issues tokens without `exp`
    pub validity: Option<Duration>,
    /// How long after the original issue time a token may be refreshed
    pub refresh_window: Option<Duration>,
    /// Verification key source
    pub public_key: KeySource,
    /// Signing key source
    pub private_key: KeySource,
}

impl TokenServiceConfig {
    /// Builds the service configuration from the `[auth.jws]` settings,
    /// resolving path aliases in the key locations.
    pub fn from_jws_config(config: &JwsConfig) -> Result<Self, TokenError> {
        let algorithm = Algorithm::from_str(config.algorithm.trim()).map_err(|_| {
            TokenError::UnsupportedAlgorithm {
                algorithm: config.algorithm.clone(),
            }
        })?;

        Ok(Self {
            algorithm,
            validity: config.validity,
            refresh_window: config.refresh_window,
            public_key: KeySource::resolve(&config.public_key, &config.aliases)?,
            private_key: KeySource::resolve(&config.private_key, &config.aliases)?,
        })
    }

    /// Configuration using in-memory PEM keys with the default one hour
    /// validity and 24 hour refresh window
    pub fn with_pem_keys(algorithm: Algorithm, public_pem: &str, private_pem: &str) -> Self {
        Self {
            algorithm,
            validity: Some(Duration::from_secs(3600)),
            refresh_window: Some(Duration::from_secs(24 * 3600)),
            public_key: KeySource::Pem(public_pem.to_string()),
            private_key: KeySource::Pem(private_pem.to_string()),
        }
    }

    pub fn with_validity(mut self, validity: Option<Duration>) -> Self {
        self.validity = validity;
        self
    }

    pub fn with_refresh_window(mut self, refresh_window: Option<Duration>) -> Self {
        self.refresh_window = refresh_window;
        self
    }

    pub(crate) fn key_provider(&self) -> KeyProvider {
        KeyProvider::new(
            self.algorithm,
            self.public_key.clone(),
            self.private_key.clone(),
        )
    }
}
