//! Sale (transaction) Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payment status code carried as `is_paid` on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PaidStatus {
    #[default]
    Unpaid,
    Paid,
    PartPaid,
}

impl From<PaidStatus> for u8 {
    fn from(status: PaidStatus) -> Self {
        match status {
            PaidStatus::Unpaid => 0,
            PaidStatus::Paid => 1,
            PaidStatus::PartPaid => 2,
        }
    }
}

impl TryFrom<u8> for PaidStatus {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Unpaid),
            1 => Ok(Self::Paid),
            2 => Ok(Self::PartPaid),
            other => Err(format!("unknown is_paid code {other}")),
        }
    }
}

/// Lifecycle status of a sale as shown in lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaleStatus {
    Unpaid,
    PartPaid,
    Paid,
    Void,
}

/// Kind of a sale line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Product,
    Package,
    /// Membership freeze adjustment
    Freeze,
}

/// Discount on a line or on the whole sale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Discount {
    /// Percentage (0-100)
    Percent(Decimal),
    /// Fixed amount
    Fixed(Decimal),
}

/// One line of a sale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleItem {
    pub kind: ItemKind,
    pub item_id: i64,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<Discount>,
}

/// Payment recorded against a sale by the remote service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalePayment {
    pub account_id: i64,
    #[serde(default)]
    pub account_name: String,
    pub amount: Decimal,
}

/// Sale record as returned by the remote service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: i64,
    pub code: String,
    pub club_id: i64,
    #[serde(default)]
    pub member_id: Option<i64>,
    pub gross_amount: Decimal,
    #[serde(default)]
    pub discount: Decimal,
    #[serde(default)]
    pub tax: Decimal,
    pub total_amount: Decimal,
    pub balance_amount: Decimal,
    #[serde(default)]
    pub is_paid: PaidStatus,
    #[serde(default)]
    pub is_void: bool,
    #[serde(default)]
    pub items: Vec<SaleItem>,
    #[serde(default)]
    pub payments: Vec<SalePayment>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Sale {
    pub fn status(&self) -> SaleStatus {
        if self.is_void {
            return SaleStatus::Void;
        }
        match self.is_paid {
            PaidStatus::Unpaid => SaleStatus::Unpaid,
            PaidStatus::PartPaid => SaleStatus::PartPaid,
            PaidStatus::Paid => SaleStatus::Paid,
        }
    }

    /// Amount already collected according to the server
    pub fn paid_amount(&self) -> Decimal {
        self.payments.iter().map(|p| p.amount).sum()
    }
}
