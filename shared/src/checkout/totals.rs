//! Sale totals
//!
//! Gross, discount, tax and total of a cart. Line discounts are applied first,
//! then the sale-level promo discount, then tax on what is left.

use crate::checkout::money::{round_money, validate_amount};
use crate::error::{CheckoutError, CheckoutResult};
use crate::models::{Discount, SaleItem};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Computed totals of a sale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SaleTotals {
    pub gross_amount: Decimal,
    pub discount: Decimal,
    pub tax: Decimal,
    pub total_amount: Decimal,
}

fn validate_discount(discount: &Discount) -> CheckoutResult<()> {
    match *discount {
        Discount::Percent(p) if p < Decimal::ZERO || p > Decimal::ONE_HUNDRED => Err(
            CheckoutError::InvalidAmount(format!("discount percent must be between 0 and 100, got {p}")),
        ),
        Discount::Percent(_) => Ok(()),
        Discount::Fixed(amount) => validate_amount(amount, "discount"),
    }
}

/// Discount amount on `base`, never more than `base`
fn discount_on(base: Decimal, discount: Option<&Discount>) -> CheckoutResult<Decimal> {
    let Some(discount) = discount else {
        return Ok(Decimal::ZERO);
    };
    validate_discount(discount)?;
    let amount = match *discount {
        Discount::Percent(p) => round_money(base * p / Decimal::ONE_HUNDRED),
        Discount::Fixed(amount) => amount,
    };
    Ok(amount.min(base))
}

/// Gross amount of one line before discounts
pub fn line_gross(item: &SaleItem) -> Decimal {
    item.unit_price * Decimal::from(item.quantity)
}

/// Compute totals for `items` with an optional sale-level promo and a tax rate in percent
pub fn compute_totals(
    items: &[SaleItem],
    promo: Option<&Discount>,
    tax_percent: Decimal,
) -> CheckoutResult<SaleTotals> {
    if tax_percent < Decimal::ZERO || tax_percent > Decimal::ONE_HUNDRED {
        return Err(CheckoutError::InvalidAmount(format!(
            "tax percent must be between 0 and 100, got {tax_percent}"
        )));
    }

    let mut gross_amount = Decimal::ZERO;
    let mut line_discounts = Decimal::ZERO;
    for item in items {
        validate_amount(item.unit_price, "unit_price")?;
        let gross = line_gross(item);
        gross_amount += gross;
        line_discounts += discount_on(gross, item.discount.as_ref())?;
    }

    let subtotal = gross_amount - line_discounts;
    let promo_discount = discount_on(subtotal, promo)?;
    let taxable = subtotal - promo_discount;
    let tax = round_money(taxable * tax_percent / Decimal::ONE_HUNDRED);

    Ok(SaleTotals {
        gross_amount,
        discount: line_discounts + promo_discount,
        tax,
        total_amount: taxable + tax,
    })
}
