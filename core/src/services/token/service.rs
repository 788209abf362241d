//! Main token service implementation

use jsonwebtoken::Algorithm;

use crate::domain::entities::token::{Claims, Token};
use crate::errors::TokenError;

use super::claims_policy::ClaimsPolicy;
use super::codec::TokenCodec;
use super::config::TokenServiceConfig;
use super::key_manager::KeyProvider;

/// Signs and checks tokens with the configured key pair
#[derive(Debug)]
pub struct TokenService {
    keys: KeyProvider,
    algorithm: Algorithm,
    claims_policy: ClaimsPolicy,
}

impl TokenService {
    /// Creates a new token service. Keys are loaded on first use.
    pub fn new(config: &TokenServiceConfig) -> Self {
        Self {
            keys: config.key_provider(),
            algorithm: config.algorithm,
            claims_policy: ClaimsPolicy::new(config.validity),
        }
    }

    /// Creates a token service around an existing key provider
    pub fn with_key_provider(keys: KeyProvider, claims_policy: ClaimsPolicy) -> Self {
        Self {
            algorithm: keys.algorithm(),
            keys,
            claims_policy,
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn claims_policy(&self) -> &ClaimsPolicy {
        &self.claims_policy
    }

    pub fn key_provider(&self) -> &KeyProvider {
        &self.keys
    }

    /// Loads both keys now
    pub fn preload(&self) -> Result<(), TokenError> {
        self.keys.preload()
    }

    /// Parses a token string without checking its signature
    pub fn load(&self, token: &str) -> Result<Token, TokenError> {
        TokenCodec::decode(token)
    }

    /// Checks the signature only; expiration is not considered.
    ///
    /// # Errors
    ///
    /// Only key loading can fail. A bad signature is `Ok(false)`.
    pub fn verify(&self, token: &Token) -> Result<bool, TokenError> {
        let key = self.keys.public_key()?;
        Ok(TokenCodec::verify(token, key, self.algorithm))
    }

    /// Signature verifies and the token has not expired at `now`
    pub fn is_valid(&self, token: &Token, now: i64) -> Result<bool, TokenError> {
        if !self.verify(token)? {
            return Ok(false);
        }
        Ok(!self.claims_policy.is_expired(token.claims(), now))
    }

    /// Signs `claims` after stamping `iat` (when absent) and `exp`
    pub fn new_token(&self, claims: Claims, now: i64) -> Result<String, TokenError> {
        let claims = self.claims_policy.with_issued_at(claims, now);
        let claims = self.claims_policy.with_expiration(claims, now);
        let key = self.keys.private_key()?;
        let token = TokenCodec::encode(&claims, key, self.algorithm)?;

        tracing::debug!(
            alg = ?self.algorithm,
            iat = ?claims.issued_at(),
            exp = ?claims.expires_at(),
            "Signed new token"
        );
        Ok(token)
    }
}
