//! Checkout submission payload
//!
//! Turns the allocator state plus the form's draft into the single request
//! body sent on save. Validation happens here, before any network call.

use crate::checkout::allocator::{AllocatorState, Phase};
use crate::checkout::money::covers;
use crate::error::{CheckoutError, CheckoutResult};
use crate::models::{Member, PaidStatus, SaleItem};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Save button the user confirmed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveMode {
    /// "Save"
    Paid,
    /// "Save as part paid"
    PartPaid,
    /// "Save as unpaid"
    Unpaid,
}

impl SaveMode {
    /// Save button to offer for the current allocation
    pub fn suggested(state: &AllocatorState) -> Self {
        if nothing_owed(state) {
            return Self::Paid;
        }
        match state.phase() {
            Phase::Empty => Self::Unpaid,
            Phase::PartiallyAllocated => Self::PartPaid,
            Phase::FullyAllocated => Self::Paid,
        }
    }
}

/// Payment line as the remote service expects it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentLine {
    /// Account (Rekening) id
    pub id: i64,
    pub amount: Decimal,
}

/// Credit taken from an earlier sale (refund or freeze adjustment)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefundSource {
    pub sale_id: i64,
    pub amount: Decimal,
}

/// Everything the form knows about the sale apart from payments
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CheckoutDraft {
    pub club_id: i64,
    pub member_id: Option<i64>,
    pub items: Vec<SaleItem>,
    pub refund_from: Vec<RefundSource>,
}

impl CheckoutDraft {
    /// Empty cart for a club, optionally for a member (walk-in sales have none)
    pub fn new(club_id: i64, member: Option<&Member>) -> Self {
        Self {
            club_id,
            member_id: member.map(|m| m.id),
            items: Vec::new(),
            refund_from: Vec::new(),
        }
    }

    pub fn with_item(mut self, item: SaleItem) -> Self {
        self.items.push(item);
        self
    }
}

/// `POST sales/checkout` request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub club_id: i64,
    pub member_id: Option<i64>,
    pub balance_amount: Decimal,
    pub is_paid: PaidStatus,
    pub items: Vec<SaleItem>,
    pub payments: Vec<PaymentLine>,
    pub refund_from: Vec<RefundSource>,
}

/// Whether the sale is settled without collecting anything (e.g. refund credit covers it)
fn nothing_owed(state: &AllocatorState) -> bool {
    state.total_amount() <= Decimal::ZERO
}

/// Check that `mode` is allowed for the current allocation
pub fn validate_save(state: &AllocatorState, mode: SaveMode) -> CheckoutResult<PaidStatus> {
    let allocated = state.allocated();
    let total = state.total_amount();
    match mode {
        SaveMode::Unpaid => Ok(PaidStatus::Unpaid),
        SaveMode::Paid if nothing_owed(state) => Ok(PaidStatus::Paid),
        _ if state.entries().is_empty() => Err(CheckoutError::NoPaymentSelected),
        SaveMode::Paid if !covers(allocated, total) => {
            Err(CheckoutError::InsufficientPayment { allocated, total })
        }
        SaveMode::Paid => Ok(PaidStatus::Paid),
        SaveMode::PartPaid if covers(allocated, total) => {
            Err(CheckoutError::AlreadyFullyPaid { allocated, total })
        }
        SaveMode::PartPaid if allocated <= Decimal::ZERO => {
            Err(CheckoutError::NoPaymentSelected)
        }
        SaveMode::PartPaid => Ok(PaidStatus::PartPaid),
    }
}

/// Build the request body for `mode`
///
/// "Save as unpaid" always drops the payment list, whatever was selected.
pub fn build_request(
    state: &AllocatorState,
    draft: &CheckoutDraft,
    mode: SaveMode,
) -> CheckoutResult<CheckoutRequest> {
    let is_paid = validate_save(state, mode)?;

    let payments = || -> Vec<PaymentLine> {
        state
            .entries()
            .iter()
            .filter(|e| !e.amount.is_zero())
            .map(|e| PaymentLine {
                id: e.account_id,
                amount: e.amount,
            })
            .collect()
    };
    // A paid sale never reports a leftover balance, even inside the tolerance
    let (payments, balance_amount) = match is_paid {
        PaidStatus::Unpaid => (Vec::new(), state.total_amount()),
        PaidStatus::Paid => (payments(), Decimal::ZERO),
        PaidStatus::PartPaid => (
            payments(),
            (state.total_amount() - state.allocated()).max(Decimal::ZERO),
        ),
    };

    Ok(CheckoutRequest {
        club_id: draft.club_id,
        member_id: draft.member_id,
        balance_amount,
        is_paid,
        items: draft.items.clone(),
        payments,
        refund_from: draft.refund_from.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::allocator::{AllocatorAction, reduce};

    fn idr(amount: i64) -> Decimal {
        Decimal::from(amount)
    }

    fn select(id: i64) -> AllocatorAction {
        AllocatorAction::Select {
            account_id: id,
            account_name: format!("Account {id}"),
        }
    }

    fn draft() -> CheckoutDraft {
        let member = Member {
            id: 42,
            name: "Budi".to_string(),
            member_code: Some("M-0042".to_string()),
            phone: None,
            is_active: true,
        };
        let mut draft = CheckoutDraft::new(1, Some(&member));
        draft.refund_from.push(RefundSource {
            sale_id: 9,
            amount: idr(5_000),
        });
        draft
    }

    #[test]
    fn test_paid_request_carries_entries() {
        let state = reduce(AllocatorState::new(idr(100_000)), select(3));
        let request = build_request(&state, &draft(), SaveMode::Paid).unwrap();

        assert_eq!(request.is_paid, PaidStatus::Paid);
        assert_eq!(request.balance_amount, Decimal::ZERO);
        assert_eq!(
            request.payments,
            vec![PaymentLine {
                id: 3,
                amount: idr(100_000)
            }]
        );
        assert_eq!(request.member_id, Some(42));
        assert_eq!(request.refund_from.len(), 1);
    }

    #[test]
    fn test_unpaid_request_drops_payments() {
        let state = reduce(AllocatorState::new(idr(200_000)), select(1));
        let request = build_request(&state, &draft(), SaveMode::Unpaid).unwrap();

        assert_eq!(request.is_paid, PaidStatus::Unpaid);
        assert!(request.payments.is_empty());
        assert_eq!(request.balance_amount, idr(200_000));

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["is_paid"], 0);
        assert_eq!(json["payments"], serde_json::json!([]));
    }

    #[test]
    fn test_part_paid_requires_partial_allocation() {
        let full = reduce(AllocatorState::new(idr(100_000)), select(1));
        assert!(matches!(
            build_request(&full, &draft(), SaveMode::PartPaid),
            Err(CheckoutError::AlreadyFullyPaid { .. })
        ));

        let partial = reduce(
            full,
            AllocatorAction::AdjustAmount {
                account_id: 1,
                amount: idr(30_000),
            },
        );
        assert!(matches!(
            build_request(&partial, &draft(), SaveMode::Paid),
            Err(CheckoutError::InsufficientPayment { .. })
        ));

        let request = build_request(&partial, &draft(), SaveMode::PartPaid).unwrap();
        assert_eq!(request.is_paid, PaidStatus::PartPaid);
        assert_eq!(request.balance_amount, idr(70_000));
        assert_eq!(SaveMode::suggested(&partial), SaveMode::PartPaid);
    }

    #[test]
    fn test_part_paid_rejects_zero_allocation() {
        let zeroed = reduce(
            reduce(AllocatorState::new(idr(100_000)), select(1)),
            AllocatorAction::AdjustAmount {
                account_id: 1,
                amount: Decimal::ZERO,
            },
        );
        assert_eq!(zeroed.entries().len(), 1);
        assert_eq!(
            build_request(&zeroed, &draft(), SaveMode::PartPaid),
            Err(CheckoutError::NoPaymentSelected)
        );
        assert!(matches!(
            build_request(&zeroed, &draft(), SaveMode::Paid),
            Err(CheckoutError::InsufficientPayment { .. })
        ));
    }

    #[test]
    fn test_zero_entries_left_out_of_payments() {
        let state = [
            select(1),
            AllocatorAction::AdjustAmount {
                account_id: 1,
                amount: Decimal::ZERO,
            },
            select(2),
        ]
        .into_iter()
        .fold(AllocatorState::new(idr(80_000)), reduce);

        let request = build_request(&state, &draft(), SaveMode::Paid).unwrap();
        assert_eq!(
            request.payments,
            vec![PaymentLine {
                id: 2,
                amount: idr(80_000)
            }]
        );
    }

    #[test]
    fn test_nothing_owed_saves_as_paid_without_payments() {
        let state = reduce(AllocatorState::new(Decimal::ZERO), select(1));
        assert!(state.entries().is_empty());
        assert_eq!(SaveMode::suggested(&state), SaveMode::Paid);

        let request = build_request(&state, &draft(), SaveMode::Paid).unwrap();
        assert_eq!(request.is_paid, PaidStatus::Paid);
        assert!(request.payments.is_empty());
        assert_eq!(request.balance_amount, Decimal::ZERO);

        assert_eq!(
            build_request(&state, &draft(), SaveMode::PartPaid),
            Err(CheckoutError::NoPaymentSelected)
        );
    }

    #[test]
    fn test_paid_within_tolerance_reports_zero_balance() {
        let state = reduce(
            reduce(AllocatorState::new(Decimal::new(10_000_005, 3)), select(1)),
            AllocatorAction::AdjustAmount {
                account_id: 1,
                amount: idr(10_000),
            },
        );
        assert_eq!(state.balance_amount(), Decimal::new(5, 3));

        let request = build_request(&state, &draft(), SaveMode::Paid).unwrap();
        assert_eq!(request.is_paid, PaidStatus::Paid);
        assert_eq!(request.balance_amount, Decimal::ZERO);
    }

    #[test]
    fn test_empty_selection_blocks_paid_modes() {
        let state = AllocatorState::new(idr(50_000));
        assert_eq!(
            build_request(&state, &draft(), SaveMode::Paid),
            Err(CheckoutError::NoPaymentSelected)
        );
        assert_eq!(
            build_request(&state, &draft(), SaveMode::PartPaid),
            Err(CheckoutError::NoPaymentSelected)
        );
        assert_eq!(SaveMode::suggested(&state), SaveMode::Unpaid);
    }
}
