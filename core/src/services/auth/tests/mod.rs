//! Unit tests for the authenticator


use jsonwebtoken::Algorithm;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use super::Authenticator;
use crate::domain::entities::SimpleIdentity;
use crate::services::clock::ManualClock;
use crate::services::token::TokenServiceConfig;

pub(super) const T0: i64 = 1_700_000_000;
pub(super) const HOUR: i64 = 3600;

pub(super) fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(path).expect("fixture should be readable")
}

pub(super) fn config() -> TokenServiceConfig {
    TokenServiceConfig::with_pem_keys(
        Algorithm::RS256,
        &fixture("public.pem"),
        &fixture("private.pem"),
    )
    .with_validity(Some(Duration::from_secs(3600)))
    .with_refresh_window(Some(Duration::from_secs(24 * 3600)))
}

pub(super) fn authenticator_with(
    config: TokenServiceConfig,
) -> (Authenticator<SimpleIdentity>, ManualClock) {
    let clock = ManualClock::at_timestamp(T0);
    let authenticator = Authenticator::from_config(&config, Arc::new(clock.clone()));
    (authenticator, clock)
}

pub(super) fn authenticator() -> (Authenticator<SimpleIdentity>, ManualClock) {
    authenticator_with(config())
}

pub(super) fn alice() -> SimpleIdentity {
    SimpleIdentity::new(1, "alice")
}
