//! Authentication configuration: JWS signing and configured user accounts

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::time::Duration;

use super::duration;

/// JWS token configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwsConfig {
    /// Location of the PEM encoded public key (path or `@alias/path`)
    pub public_key: String,

    /// Location of the PEM encoded private key (path or `@alias/path`)
    pub private_key: String,

    /// Algorithm used to sign tokens (default: RS256)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// Period of time for which a token is valid for authentication.
    /// `None` issues tokens without an `exp` claim.
    #[serde(default = "default_validity", with = "duration::optional")]
    pub validity: Option<Duration>,

    /// Period of time, measured from the original issue time, during which
    /// an expired token may be refreshed. `None` disables refresh.
    #[serde(default = "default_refresh_window", with = "duration::optional")]
    pub refresh_window: Option<Duration>,

    /// Path aliases usable in key locations, e.g. `app = "/srv/jwsauth"`
    /// makes `@app/keys/public.pem` resolve under `/srv/jwsauth`.
    #[serde(default)]
    pub aliases: HashMap<String, String>,
}

impl Default for JwsConfig {
    fn default() -> Self {
        Self {
            public_key: String::from("@app/keys/public.pem"),
            private_key: String::from("@app/keys/private.pem"),
            algorithm: default_algorithm(),
            validity: default_validity(),
            refresh_window: default_refresh_window(),
            aliases: HashMap::from([(String::from("app"), String::from("."))]),
        }
    }
}

impl JwsConfig {
    /// Create a configuration pointing at the given key files
    pub fn new(public_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            private_key: private_key.into(),
            ..Default::default()
        }
    }

    /// Set the token validity period
    pub fn with_validity(mut self, validity: Option<Duration>) -> Self {
        self.validity = validity;
        self
    }

    /// Set the refresh window
    pub fn with_refresh_window(mut self, refresh_window: Option<Duration>) -> Self {
        self.refresh_window = refresh_window;
        self
    }

    /// Register a path alias
    pub fn with_alias(mut self, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.aliases.insert(name.into(), path.into());
        self
    }

    /// Check if refresh is enabled at all
    pub fn is_refresh_enabled(&self) -> bool {
        self.refresh_window.is_some()
    }
}

/// A user account known to the configured identity store
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserAccountConfig {
    /// Numeric user id carried in the `id` claim
    pub id: i64,

    /// Login name
    pub username: String,

    /// bcrypt hash of the user's password
    pub password_hash: String,

    /// Authorizations embedded in issued tokens
    #[serde(default)]
    pub authorizations: Vec<String>,

    /// Additional user info embedded in issued tokens
    #[serde(default)]
    pub info: Map<String, Value>,
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWS configuration
    #[serde(default)]
    pub jws: JwsConfig,

    /// Accounts served by the configured identity store
    #[serde(default)]
    pub users: Vec<UserAccountConfig>,
}

fn default_algorithm() -> String {
    String::from("RS256")
}

fn default_validity() -> Option<Duration> {
    Some(Duration::from_secs(60 * 60)) // 1 hour
}

fn default_refresh_window() -> Option<Duration> {
    Some(Duration::from_secs(24 * 60 * 60)) // 24 hours
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jws_config_default() {
        let config = JwsConfig::default();
        assert_eq!(config.algorithm, "RS256");
        assert_eq!(config.validity, Some(Duration::from_secs(3600)));
        assert_eq!(config.refresh_window, Some(Duration::from_secs(86_400)));
        assert_eq!(config.aliases.get("app").map(String::as_str), Some("."));
        assert!(config.is_refresh_enabled());
    }

    #[test]
    fn test_jws_config_builder() {
        let config = JwsConfig::new("pub.pem", "priv.pem")
            .with_validity(Some(Duration::from_secs(900)))
            .with_refresh_window(None)
            .with_alias("keys", "/etc/jwsauth");

        assert_eq!(config.public_key, "pub.pem");
        assert_eq!(config.private_key, "priv.pem");
        assert_eq!(config.validity, Some(Duration::from_secs(900)));
        assert!(!config.is_refresh_enabled());
        assert_eq!(config.aliases.get("keys").map(String::as_str), Some("/etc/jwsauth"));
    }

    #[test]
    fn test_jws_config_from_json_durations() {
        let config: JwsConfig = serde_json::from_value(serde_json::json!({
            "public_key": "pub.pem",
            "private_key": "priv.pem",
            "validity": "15min",
            "refresh_window": ""
        }))
        .unwrap();

        assert_eq!(config.validity, Some(Duration::from_secs(900)));
        assert_eq!(config.refresh_window, None);
        assert_eq!(config.algorithm, "RS256");
    }

    #[test]
    fn test_jws_config_missing_durations_use_defaults() {
        let config: JwsConfig = serde_json::from_value(serde_json::json!({
            "public_key": "pub.pem",
            "private_key": "priv.pem"
        }))
        .unwrap();

        assert_eq!(config.validity, Some(Duration::from_secs(3600)));
        assert_eq!(config.refresh_window, Some(Duration::from_secs(86_400)));
    }
}
