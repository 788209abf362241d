//! Authentication service module
//!
//! Stateless bearer authentication over signed tokens: issuing a token at
//! login, authenticating a presented token, and renewing an expired one
//! within the refresh window.

mod authenticator;

#[cfg(test)]
mod tests;

pub use authenticator::Authenticator;
