use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use jwsauth_core::{Identity, SimpleIdentity};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AuthenticateRequest {
    /// Login name
    #[validate(length(min = 1, max = 128))]
    pub username: String,

    /// Plain-text password, checked against the stored hash
    #[validate(length(min = 1, max = 256))]
    pub password: String,
}

/// Response body carrying a signed token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthToken {
    pub token: String,
}

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

/// The authenticated identity as seen by the server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    pub id: i64,
    pub username: String,
    pub authorizations: Vec<String>,
    #[serde(skip_serializing_if = "Map::is_empty", default)]
    pub info: Map<String, Value>,
    /// Unix time of the original login
    pub authenticated_at: Option<i64>,
}

impl From<&SimpleIdentity> for MeResponse {
    fn from(identity: &SimpleIdentity) -> Self {
        Self {
            id: identity.id,
            username: identity.username.clone(),
            authorizations: identity.authorizations.clone(),
            info: identity.info.clone(),
            authenticated_at: identity.auth_key_issue_time(),
        }
    }
}
