//! Domain entities representing core business objects.

pub mod identity;
pub mod token;

// Re-export commonly used types
pub use identity::{
    Identity, SimpleIdentity, CLAIM_AUTHORIZATIONS, CLAIM_ID, CLAIM_INFO, CLAIM_USERNAME,
};
pub use token::{Claims, Token, TokenHeader, CLAIM_EXPIRATION, CLAIM_ISSUED_AT, TOKEN_TYPE};
