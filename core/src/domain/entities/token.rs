//! Token entities for JWS-based authentication.

use jsonwebtoken::Algorithm;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Hard expiration claim (unix seconds)
pub const CLAIM_EXPIRATION: &str = "exp";

/// Original issue time claim (unix seconds), preserved across refresh
pub const CLAIM_ISSUED_AT: &str = "iat";

/// Header type marker
pub const TOKEN_TYPE: &str = "JWT";

/// Payload of a token: claim name to claim value.
///
/// Only `exp` and `iat` carry meaning here; every other claim is opaque
/// application data that passes through unmodified.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(Map<String, Value>);

impl Claims {
    /// Creates an empty claim set
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Returns the value of a claim
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Checks whether a claim is present
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Sets a claim, returning the previous value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(name.into(), value.into())
    }

    /// Builder-style variant of [`Claims::insert`]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Removes a claim, returning its value
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.0.remove(name)
    }

    /// Reads a claim as a unix timestamp.
    ///
    /// Integers, floats (truncated) and numeric strings are accepted; any
    /// other value yields `None`.
    pub fn timestamp(&self, name: &str) -> Option<i64> {
        match self.0.get(name)? {
            Value::Number(number) => number
                .as_i64()
                .or_else(|| number.as_f64().map(|value| value as i64)),
            Value::String(text) => {
                let text = text.trim();
                text.parse::<i64>()
                    .ok()
                    .or_else(|| text.parse::<f64>().ok().map(|value| value as i64))
            }
            _ => None,
        }
    }

    /// The `exp` claim, if present and numeric
    pub fn expires_at(&self) -> Option<i64> {
        self.timestamp(CLAIM_EXPIRATION)
    }

    /// The `iat` claim, if present and numeric
    pub fn issued_at(&self) -> Option<i64> {
        self.timestamp(CLAIM_ISSUED_AT)
    }

    /// Drops the internal-only `exp` claim
    pub fn without_expiration(mut self) -> Self {
        self.0.remove(CLAIM_EXPIRATION);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Claims {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Claims> for Value {
    fn from(claims: Claims) -> Self {
        Value::Object(claims.0)
    }
}

/// JOSE header of a token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHeader {
    /// Type marker, `JWT` for tokens issued here
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,

    /// Algorithm the token declares it was signed with
    pub alg: Algorithm,
}

impl TokenHeader {
    /// Header for a token signed with `alg`
    pub fn new(alg: Algorithm) -> Self {
        Self {
            typ: Some(TOKEN_TYPE.to_string()),
            alg,
        }
    }
}

/// A decoded, not necessarily verified, token
#[derive(Debug, Clone)]
pub struct Token {
    header: TokenHeader,
    claims: Claims,
    /// `base64url(header) "." base64url(payload)` exactly as received
    signing_input: String,
    /// base64url signature segment exactly as received
    signature: String,
}

impl Token {
    pub(crate) fn new(
        header: TokenHeader,
        claims: Claims,
        signing_input: String,
        signature: String,
    ) -> Self {
        Self {
            header,
            claims,
            signing_input,
            signature,
        }
    }

    pub fn header(&self) -> &TokenHeader {
        &self.header
    }

    /// Algorithm declared in the header
    pub fn algorithm(&self) -> Algorithm {
        self.header.alg
    }

    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    pub fn into_claims(self) -> Claims {
        self.claims
    }

    /// The exact bytes the signature covers
    pub fn signing_input(&self) -> &str {
        &self.signing_input
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_timestamp_accepts_numeric_forms() {
        let claims = Claims::new()
            .with("exp", 1_700_000_000)
            .with("iat", "1699990000")
            .with("nbf", 1_699_990_000.9);

        assert_eq!(claims.expires_at(), Some(1_700_000_000));
        assert_eq!(claims.issued_at(), Some(1_699_990_000));
        assert_eq!(claims.timestamp("nbf"), Some(1_699_990_000));
    }

    #[test]
    fn test_timestamp_rejects_non_numeric() {
        let claims = Claims::new()
            .with("exp", "tomorrow")
            .with("iat", json!({"at": 1}));

        assert!(claims.contains("exp"));
        assert_eq!(claims.expires_at(), None);
        assert_eq!(claims.issued_at(), None);
        assert_eq!(claims.timestamp("missing"), None);
    }

    #[test]
    fn test_without_expiration_keeps_other_claims() {
        let claims = Claims::new()
            .with("id", 1)
            .with("exp", 10)
            .with("iat", 5)
            .without_expiration();

        assert!(!claims.contains("exp"));
        assert_eq!(claims.issued_at(), Some(5));
        assert_eq!(claims.get("id"), Some(&json!(1)));
        assert_eq!(claims.len(), 2);
    }

    #[test]
    fn test_header_serialization() {
        let header = TokenHeader::new(Algorithm::RS256);
        let json = serde_json::to_string(&header).unwrap();
        assert_eq!(json, r#"{"typ":"JWT","alg":"RS256"}"#);

        let parsed: TokenHeader =
            serde_json::from_str(r#"{"alg":"RS256","kid":"k1","typ":"JWT"}"#).unwrap();
        assert_eq!(parsed, header);

        let untyped: TokenHeader = serde_json::from_str(r#"{"alg":"ES256"}"#).unwrap();
        assert_eq!(untyped.typ, None);
        assert_eq!(untyped.alg, Algorithm::ES256);
    }

    #[test]
    fn test_header_rejects_unknown_algorithm() {
        assert!(serde_json::from_str::<TokenHeader>(r#"{"alg":"none"}"#).is_err());
        assert!(serde_json::from_str::<TokenHeader>(r#"{"typ":"JWT"}"#).is_err());
    }
}
