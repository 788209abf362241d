//! Authentication route handlers
//!
//! - Login with username and password
//! - Token refresh
//! - Who-am-I for an authenticated request

pub mod authenticate;
pub mod me;
pub mod refresh;

pub use authenticate::authenticate;
pub use me::me;
pub use refresh::refresh_token;
