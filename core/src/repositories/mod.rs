//! Repository interfaces for the domain layer

pub mod identity;

pub use identity::IdentityRepository;
