//! Shared setup for API integration tests

use actix_web::web;
use jsonwebtoken::Algorithm;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use jwsauth_api::repositories::StaticIdentityRepository;
use jwsauth_api::AppState;
use jwsauth_core::services::token::TokenServiceConfig;
use jwsauth_core::{Authenticator, ManualClock};
use jwsauth_shared::UserAccountConfig;

pub const T0: i64 = 1_700_000_000;
pub const PASSWORD: &str = "wonderland";

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("core")
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(path).expect("fixture should be readable")
}

pub fn token_config() -> TokenServiceConfig {
    TokenServiceConfig::with_pem_keys(
        Algorithm::RS256,
        &fixture("public.pem"),
        &fixture("private.pem"),
    )
    .with_validity(Some(Duration::from_secs(3600)))
    .with_refresh_window(Some(Duration::from_secs(24 * 3600)))
}

pub fn users() -> Vec<UserAccountConfig> {
    vec![UserAccountConfig {
        id: 1,
        username: "alice".to_string(),
        password_hash: bcrypt::hash(PASSWORD, 4).expect("hashing should succeed"),
        authorizations: vec!["reader".to_string()],
        info: serde_json::Map::new(),
    }]
}

/// State on a manual clock starting at `T0`
pub fn state_with(
    config: TokenServiceConfig,
    users: &[UserAccountConfig],
) -> (web::Data<AppState>, ManualClock) {
    let clock = ManualClock::at_timestamp(T0);
    let authenticator = Authenticator::from_config(&config, Arc::new(clock.clone()));
    let identities = StaticIdentityRepository::from_config(users);
    let state = AppState::new(Arc::new(authenticator), Arc::new(identities));
    (web::Data::new(state), clock)
}

pub fn state() -> (web::Data<AppState>, ManualClock) {
    state_with(token_config(), &users())
}
