//! Identity entities reconstructed from verified token payloads.
//!
//! A verified payload *is* the identity snapshot taken at issuance, so no
//! lookup is needed to authenticate a request. Applications implement
//! [`Identity`] for their own principal type, or use [`SimpleIdentity`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::token::{Claims, CLAIM_ISSUED_AT};
use crate::errors::TokenError;

/// Claim carrying the principal id
pub const CLAIM_ID: &str = "id";

/// Claim carrying the login name
pub const CLAIM_USERNAME: &str = "username";

/// Claim carrying the authorization list
pub const CLAIM_AUTHORIZATIONS: &str = "authorizations";

/// Claim carrying additional user info
pub const CLAIM_INFO: &str = "info";

/// A principal that can be signed into a token and read back from one
pub trait Identity: Sized + Send + Sync {
    /// Rebuilds the identity from a verified payload (without `exp`)
    fn from_claims(claims: Claims) -> Result<Self, TokenError>;

    /// Value of the `id` claim
    fn id(&self) -> Value;

    /// Value of the `username` claim
    fn username(&self) -> &str;

    /// Unix timestamp of the original authentication, `None` if this
    /// identity was never issued a token
    fn auth_key_issue_time(&self) -> Option<i64>;

    /// Authorizations to embed in the token
    fn token_authorizations(&self) -> Vec<String> {
        Vec::new()
    }

    /// Additional user info to embed in the token
    fn token_info(&self) -> Map<String, Value> {
        Map::new()
    }

    /// The claim set to sign, derived from the identity's current state.
    /// Empty authorizations and info are omitted.
    fn token_claims(&self) -> Claims {
        let mut claims = Claims::new()
            .with(CLAIM_ID, self.id())
            .with(CLAIM_USERNAME, self.username());

        let authorizations = self.token_authorizations();
        if !authorizations.is_empty() {
            claims.insert(CLAIM_AUTHORIZATIONS, authorizations);
        }

        let info = self.token_info();
        if !info.is_empty() {
            claims.insert(CLAIM_INFO, info);
        }

        claims
    }
}

/// Default identity carrying id, username, authorizations and info
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleIdentity {
    pub id: i64,

    pub username: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authorizations: Vec<String>,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub info: Map<String, Value>,

    /// Issue time of the token this identity was read from
    #[serde(skip)]
    pub iat: Option<i64>,
}

impl SimpleIdentity {
    /// A fresh identity that has not been issued a token yet
    pub fn new(id: i64, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            authorizations: Vec::new(),
            info: Map::new(),
            iat: None,
        }
    }

    pub fn with_authorizations(mut self, authorizations: Vec<String>) -> Self {
        self.authorizations = authorizations;
        self
    }

    pub fn with_info(mut self, info: Map<String, Value>) -> Self {
        self.info = info;
        self
    }

    /// Checks whether the identity carries an authorization
    pub fn has_authorization(&self, authorization: &str) -> bool {
        self.authorizations.iter().any(|a| a == authorization)
    }
}

impl Identity for SimpleIdentity {
    fn from_claims(mut claims: Claims) -> Result<Self, TokenError> {
        let iat = claims.issued_at();
        claims.remove(CLAIM_ISSUED_AT);

        let mut identity: SimpleIdentity = serde_json::from_value(claims.into())
            .map_err(|e| TokenError::InvalidClaims {
                message: e.to_string(),
            })?;
        identity.iat = iat;
        Ok(identity)
    }

    fn id(&self) -> Value {
        Value::from(self.id)
    }

    fn username(&self) -> &str {
        &self.username
    }

    fn auth_key_issue_time(&self) -> Option<i64> {
        self.iat
    }

    fn token_authorizations(&self) -> Vec<String> {
        self.authorizations.clone()
    }

    fn token_info(&self) -> Map<String, Value> {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_token_claims_omit_empty_lists() {
        let claims = SimpleIdentity::new(1, "alice").token_claims();

        assert_eq!(claims.get("id"), Some(&json!(1)));
        assert_eq!(claims.get("username"), Some(&json!("alice")));
        assert!(!claims.contains("authorizations"));
        assert!(!claims.contains("info"));
        assert!(!claims.contains("iat"));
    }

    #[test]
    fn test_token_claims_include_authorizations_and_info() {
        let mut info = Map::new();
        info.insert("locale".to_string(), json!("en"));
        let identity = SimpleIdentity::new(7, "bob")
            .with_authorizations(vec!["admin".to_string()])
            .with_info(info);

        let claims = identity.token_claims();
        assert_eq!(claims.get("authorizations"), Some(&json!(["admin"])));
        assert_eq!(claims.get("info"), Some(&json!({"locale": "en"})));
        assert!(identity.has_authorization("admin"));
        assert!(!identity.has_authorization("root"));
    }

    #[test]
    fn test_from_claims_reads_issue_time() {
        let claims = Claims::new()
            .with("id", 1)
            .with("username", "alice")
            .with("iat", 1_700_000_000);

        let identity = SimpleIdentity::from_claims(claims).unwrap();
        assert_eq!(identity.id, 1);
        assert_eq!(identity.username, "alice");
        assert_eq!(identity.auth_key_issue_time(), Some(1_700_000_000));
    }

    #[test]
    fn test_from_claims_ignores_unknown_claims() {
        let claims = Claims::new()
            .with("id", 3)
            .with("username", "carol")
            .with("tenant", "acme");

        let identity = SimpleIdentity::from_claims(claims).unwrap();
        assert_eq!(identity.id, 3);
        assert_eq!(identity.auth_key_issue_time(), None);
    }

    #[test]
    fn test_from_claims_requires_id_and_username() {
        let claims = Claims::new().with("username", "nobody");
        let result = SimpleIdentity::from_claims(claims);
        assert!(matches!(result, Err(TokenError::InvalidClaims { .. })));
    }
}
