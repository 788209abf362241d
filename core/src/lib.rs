//! # JwsAuth Core
//!
//! Token lifecycle engine for stateless bearer authentication.
//! This crate contains the token and identity entities, the signing,
//! expiration and refresh services, the identity store interface, and the
//! error types the transport layer maps into responses.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{Claims, Identity, SimpleIdentity, Token};
pub use errors::{AuthFailure, DomainError, DomainResult, TokenError};
pub use repositories::IdentityRepository;
pub use services::{
    Authenticator, Clock, KeyProvider, ManualClock, SystemClock, TokenService, TokenServiceConfig,
};
