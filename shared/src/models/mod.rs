//! Data models
//!
//! Shapes exchanged with the remote gym-management API.
//! All IDs are `i64`; all money is `rust_decimal::Decimal` serialised as a JSON number.

pub mod account;
pub mod member;
pub mod sale;

// Re-exports
pub use account::*;
pub use member::*;
pub use sale::*;
