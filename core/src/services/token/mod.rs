//! Token service module for JWS management
//!
//! This module handles all token-related operations including:
//! - Key loading and caching for asymmetric signing
//! - Compact serialization, signing and signature verification
//! - Expiration stamping and checks
//! - Refresh eligibility based on the original issue time

mod claims_policy;
mod codec;
mod config;
mod key_manager;
mod refresh_policy;
mod service;

#[cfg(test)]
mod tests;

pub use claims_policy::ClaimsPolicy;
pub use codec::TokenCodec;
pub use config::TokenServiceConfig;
pub use key_manager::{KeyProvider, KeySource};
pub use refresh_policy::{RefreshPolicy, RefreshState};
pub use service::TokenService;
