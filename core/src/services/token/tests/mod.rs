//! Unit tests for the token service module

mod key_provider_tests;

use jsonwebtoken::Algorithm;
use std::path::PathBuf;

use super::{TokenService, TokenServiceConfig};

/// Fixed instant used across tests (2023-11-14T22:13:20Z)
pub(super) const NOW: i64 = 1_700_000_000;

pub(super) fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub(super) fn fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name)).expect("fixture should be readable")
}

pub(super) fn test_config() -> TokenServiceConfig {
    TokenServiceConfig::with_pem_keys(
        Algorithm::RS256,
        &fixture("public.pem"),
        &fixture("private.pem"),
    )
}

pub(super) fn test_service() -> TokenService {
    TokenService::new(&test_config())
}
