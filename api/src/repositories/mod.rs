//! Identity store implementations shipped with the server

pub mod static_identity;

pub use static_identity::StaticIdentityRepository;
