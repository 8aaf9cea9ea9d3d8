//! Shared types for the gym dashboard
//!
//! Wire types, error types and the pure checkout logic used by the
//! client crate and its front ends.

pub mod checkout;
pub mod client;
pub mod error;
pub mod models;
pub mod response;
pub mod types;

// Re-exports
pub use rust_decimal::Decimal;
pub use serde::{Deserialize, Serialize};

pub use error::{CheckoutError, CheckoutResult};
pub use response::{DataResponse, Page, PageMeta};
