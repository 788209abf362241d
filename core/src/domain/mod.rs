//! Domain layer containing token and identity entities.

pub mod entities;

// Re-export commonly used domain types
pub use entities::*;
