//! Checkout Module
//!
//! Pure checkout logic shared by every front end:
//! - `allocator`: payment-method selection reducer and balance bookkeeping
//! - `payload`: validation and construction of the submission body
//! - `totals`: gross / discount / tax / total arithmetic
//! - `money`: decimal helpers

pub mod allocator;
pub mod money;
pub mod payload;
pub mod totals;

// Re-exports
pub use allocator::{AllocatorAction, AllocatorState, PaymentEntry, Phase, reduce};
pub use payload::{
    CheckoutDraft, CheckoutRequest, PaymentLine, RefundSource, SaveMode, build_request,
    validate_save,
};
pub use totals::{SaleTotals, compute_totals};
