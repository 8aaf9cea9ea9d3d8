//! Money calculation utilities using rust_decimal for precision
//!
//! Amounts travel over the wire as JSON numbers and are held as `Decimal`
//! everywhere in memory.

use crate::error::{CheckoutError, CheckoutResult};
use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
pub const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Maximum accepted amount for a single payment or line (1,000,000,000)
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Round to 2 decimal places, midpoint away from zero
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Validate a monetary amount entered by the user
pub fn validate_amount(value: Decimal, field_name: &str) -> CheckoutResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(CheckoutError::InvalidAmount(format!(
            "{} must be non-negative, got {}",
            field_name, value
        )));
    }
    if value > MAX_AMOUNT {
        return Err(CheckoutError::InvalidAmount(format!(
            "{} exceeds maximum allowed ({}), got {}",
            field_name, MAX_AMOUNT, value
        )));
    }
    Ok(())
}

/// Whether `paid` covers `due` within [`MONEY_TOLERANCE`]
pub fn covers(paid: Decimal, due: Decimal) -> bool {
    paid + MONEY_TOLERANCE > due
}
