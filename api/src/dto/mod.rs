pub mod auth;

pub use auth::*;
pub use jwsauth_shared::ErrorResponse;
