//! Business services containing the token lifecycle logic.

pub mod auth;
pub mod clock;
pub mod token;

// Re-export commonly used types
pub use auth::Authenticator;
pub use clock::{Clock, ManualClock, SystemClock};
pub use token::{
    ClaimsPolicy, KeyProvider, KeySource, RefreshPolicy, RefreshState, TokenCodec, TokenService,
    TokenServiceConfig,
};
