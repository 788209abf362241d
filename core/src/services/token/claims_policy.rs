//! Time-based claims: stamping `iat`/`exp` and checking expiration

use std::time::Duration;

use crate::domain::entities::token::{Claims, CLAIM_EXPIRATION, CLAIM_ISSUED_AT};

/// Attaches and evaluates the reserved time claims
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimsPolicy {
    validity: Option<Duration>,
}

impl ClaimsPolicy {
    /// `validity` of `None` issues tokens that never time-expire
    pub fn new(validity: Option<Duration>) -> Self {
        Self { validity }
    }

    pub fn validity(&self) -> Option<Duration> {
        self.validity
    }

    /// Adds `exp = now + validity`. Without a validity period the claims
    /// are returned unchanged, including any `exp` they already carry.
    pub fn with_expiration(&self, mut claims: Claims, now: i64) -> Claims {
        if let Some(validity) = self.validity {
            claims.insert(CLAIM_EXPIRATION, now.saturating_add(seconds(validity)));
        }
        claims
    }

    /// Adds `iat = now` unless the claims already record an issue time
    pub fn with_issued_at(&self, mut claims: Claims, now: i64) -> Claims {
        if !claims.contains(CLAIM_ISSUED_AT) {
            claims.insert(CLAIM_ISSUED_AT, now);
        }
        claims
    }

    /// True iff `exp` is present and `exp < now`.
    ///
    /// An `exp` that is present but not a number counts as expired.
    pub fn is_expired(&self, claims: &Claims, now: i64) -> bool {
        if !claims.contains(CLAIM_EXPIRATION) {
            return false;
        }
        match claims.expires_at() {
            Some(exp) => exp < now,
            None => true,
        }
    }
}

pub(crate) fn seconds(duration: Duration) -> i64 {
    i64::try_from(duration.as_secs()).unwrap_or(i64::MAX)
}
