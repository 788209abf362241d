//! Boundary component for stateless token authentication

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use jwsauth_shared::config::JwsConfig;

use crate::domain::entities::token::{Token, CLAIM_ISSUED_AT};
use crate::domain::entities::Identity;
use crate::errors::{AuthFailure, DomainError, DomainResult, TokenError};
use crate::services::clock::{Clock, SystemClock};
use crate::services::token::{RefreshPolicy, RefreshState, TokenService, TokenServiceConfig};

/// Issues, authenticates and refreshes tokens for identities of type `I`.
///
/// Every operation reads the clock once. Expected credential problems come
/// back as [`DomainError::Auth`]; key loading problems are configuration
/// faults and come back unchanged as [`DomainError::Token`].
pub struct Authenticator<I> {
    tokens: TokenService,
    refresh_policy: RefreshPolicy,
    clock: Arc<dyn Clock>,
    _identity: PhantomData<fn() -> I>,
}

impl<I> fmt::Debug for Authenticator<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authenticator")
            .field("tokens", &self.tokens)
            .field("refresh_policy", &self.refresh_policy)
            .field("clock", &self.clock)
            .finish()
    }
}

impl<I: Identity> Authenticator<I> {
    pub fn new(tokens: TokenService, refresh_policy: RefreshPolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            tokens,
            refresh_policy,
            clock,
            _identity: PhantomData,
        }
    }

    /// Builds an authenticator from token service settings
    pub fn from_config(config: &TokenServiceConfig, clock: Arc<dyn Clock>) -> Self {
        Self::new(
            TokenService::new(config),
            RefreshPolicy::new(config.refresh_window),
            clock,
        )
    }

    /// Builds an authenticator on the wall clock from `[auth.jws]` settings
    pub fn from_jws_config(config: &JwsConfig) -> Result<Self, TokenError> {
        let config = TokenServiceConfig::from_jws_config(config)?;
        Ok(Self::from_config(&config, Arc::new(SystemClock)))
    }

    pub fn token_service(&self) -> &TokenService {
        &self.tokens
    }

    pub fn refresh_policy(&self) -> &RefreshPolicy {
        &self.refresh_policy
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Signs a token for `identity`.
    ///
    /// `iat` is the identity's original issue time when it has one (an
    /// identity read from a token), otherwise now.
    pub fn issue_token(&self, identity: &I) -> DomainResult<String> {
        let now = self.clock.timestamp();
        self.sign(identity, identity.auth_key_issue_time(), now)
    }

    /// Signs a token for `identity` carrying the given original issue time.
    ///
    /// Used after reloading an identity from a store, where the fresh
    /// instance no longer knows when its session began.
    pub fn reissue(&self, identity: &I, issued_at: Option<i64>) -> DomainResult<String> {
        let now = self.clock.timestamp();
        self.sign(identity, issued_at, now)
    }

    /// Authenticates a bearer credential and rebuilds its identity.
    ///
    /// # Errors
    ///
    /// * `AuthFailure::Missing` - no credential was presented
    /// * `AuthFailure::InvalidOrExpired` - malformed, forged, expired, or
    ///   carrying claims the identity type cannot read
    /// * `DomainError::Token` - the verification key could not be loaded
    pub fn authenticate(&self, credential: Option<&str>) -> DomainResult<I> {
        let credential = present(credential)?;
        let now = self.clock.timestamp();

        let token = self.load(credential)?;
        if !self.tokens.is_valid(&token, now)? {
            tracing::warn!(
                exp = ?token.claims().expires_at(),
                now,
                "Rejected token: bad signature or expired"
            );
            return Err(AuthFailure::InvalidOrExpired.into());
        }

        identity_from(token)
    }

    /// Verifies an (expired) credential for refresh and returns its
    /// identity, without issuing anything.
    ///
    /// Only the signature and the refresh window are checked; `exp` is not.
    ///
    /// # Errors
    ///
    /// * `AuthFailure::Missing` - no credential was presented
    /// * `AuthFailure::InvalidOrExpired` - malformed or forged
    /// * `AuthFailure::RefreshExpired` - outside the refresh window, or
    ///   refresh is disabled
    pub fn resolve_refreshable(&self, credential: Option<&str>) -> DomainResult<I> {
        let credential = present(credential)?;
        let now = self.clock.timestamp();
        self.resolve_at(credential, now).map(|(identity, _)| identity)
    }

    /// Exchanges a credential within the refresh window for a new token
    /// with a fresh `exp` and the original `iat`.
    ///
    /// The new claims are derived from the identity, not copied from the
    /// old token.
    pub fn refresh(&self, credential: Option<&str>) -> DomainResult<String> {
        let credential = present(credential)?;
        let now = self.clock.timestamp();

        let (identity, issued_at) = self.resolve_at(credential, now)?;
        self.sign(&identity, issued_at, now)
    }

    fn resolve_at(&self, credential: &str, now: i64) -> DomainResult<(I, Option<i64>)> {
        let token = self.load(credential)?;
        if !self.tokens.verify(&token)? {
            tracing::warn!("Rejected refresh: signature does not verify");
            return Err(AuthFailure::InvalidOrExpired.into());
        }

        let issued_at = token.claims().issued_at();
        match self.refresh_policy.evaluate(issued_at, now) {
            RefreshState::Refreshable => Ok((identity_from(token)?, issued_at)),
            state => {
                tracing::debug!(?state, iat = ?issued_at, now, "Refresh refused");
                Err(AuthFailure::RefreshExpired.into())
            }
        }
    }

    fn load(&self, credential: &str) -> DomainResult<Token> {
        self.tokens.load(credential).map_err(|e| {
            tracing::warn!(error = %e, "Rejected unreadable credential");
            DomainError::from(AuthFailure::InvalidOrExpired)
        })
    }

    fn sign(&self, identity: &I, issued_at: Option<i64>, now: i64) -> DomainResult<String> {
        let mut claims = identity.token_claims();
        claims.insert(CLAIM_ISSUED_AT, issued_at.unwrap_or(now));

        let token = self.tokens.new_token(claims, now)?;
        tracing::debug!(username = identity.username(), "Issued token");
        Ok(token)
    }
}

fn present(credential: Option<&str>) -> Result<&str, AuthFailure> {
    match credential.map(str::trim) {
        Some(credential) if !credential.is_empty() => Ok(credential),
        _ => Err(AuthFailure::Missing),
    }
}

fn identity_from<I: Identity>(token: Token) -> DomainResult<I> {
    let claims = token.into_claims().without_expiration();
    I::from_claims(claims).map_err(|e| {
        tracing::warn!(error = %e, "Token claims do not describe an identity");
        DomainError::from(AuthFailure::InvalidOrExpired)
    })
}
