//! Checkout error types
//!
//! Errors raised by the pure checkout logic before anything reaches the
//! remote service. All of them are recoverable at the form boundary.

use rust_decimal::Decimal;
use thiserror::Error;

/// Message shown on the payment-method field when it is required but empty
pub const PAYMENT_REQUIRED_MESSAGE: &str = "Select at least one payment method";

/// Checkout validation error
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CheckoutError {
    /// "Save as paid" or "save as part paid" with an empty payment list
    #[error("{}", PAYMENT_REQUIRED_MESSAGE)]
    NoPaymentSelected,

    /// "Save as paid" while the allocated amount does not cover the total
    #[error("Allocated {allocated} does not cover total {total}")]
    InsufficientPayment { allocated: Decimal, total: Decimal },

    /// "Save as part paid" while the allocated amount already covers the total
    #[error("Allocated {allocated} already covers total {total}, save as paid instead")]
    AlreadyFullyPaid { allocated: Decimal, total: Decimal },

    /// Amount outside the accepted range
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// A save request for this form is still pending
    #[error("A save is already in progress")]
    SaveInFlight,
}

impl CheckoutError {
    /// Whether the error should mark the payment field invalid
    pub fn is_field_error(&self) -> bool {
        matches!(
            self,
            Self::NoPaymentSelected | Self::InsufficientPayment { .. } | Self::AlreadyFullyPaid { .. }
        )
    }
}

/// Result type for checkout operations
pub type CheckoutResult<T> = Result<T, CheckoutError>;
