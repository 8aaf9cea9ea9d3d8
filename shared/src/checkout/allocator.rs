//! Payment allocator
//!
//! Reconciles the payment-method selections of one checkout form against the
//! amount still owed. The state is only ever changed through [`reduce`], a pure
//! function from `(state, action)` to the next state, so every transition can be
//! exercised without a form or a network.
//!
//! Invariants kept by every transition:
//! - an account id appears at most once in `entries` (repeat selections merge)
//! - `balance_amount == total_amount - allocated()`, except after a removal where
//!   the balance is floored at zero
//! - an empty entry list always means `balance_amount == total_amount`

use crate::checkout::money::validate_amount;
use crate::error::PAYMENT_REQUIRED_MESSAGE;
use crate::models::Account;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// One allocation of money to a financial account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentEntry {
    pub account_id: i64,
    pub account_name: String,
    pub amount: Decimal,
}

/// Allocation progress of a form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No payment entries, balance equals the total
    Empty,
    /// Entries exist but the total is not covered yet
    PartiallyAllocated,
    /// Entries cover the total; new accounts can no longer be selected
    FullyAllocated,
}

/// User action on the payment-method selector
#[derive(Debug, Clone, PartialEq)]
pub enum AllocatorAction {
    /// Account picked in the selector
    Select { account_id: i64, account_name: String },
    /// Single entry removed
    Remove(i64),
    /// Selector cleared entirely
    Clear,
    /// Outstanding total re-fetched from the server
    TotalChanged(Decimal),
    /// Amount of an existing entry edited
    AdjustAmount { account_id: i64, amount: Decimal },
}

impl AllocatorAction {
    pub fn select(account: &Account) -> Self {
        Self::Select {
            account_id: account.id,
            account_name: account.name.clone(),
        }
    }
}

/// Transient allocator state of one checkout form
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AllocatorState {
    total_amount: Decimal,
    balance_amount: Decimal,
    entries: Vec<PaymentEntry>,
    field_error: Option<String>,
}

impl AllocatorState {
    /// Empty allocation against `total_amount`
    pub fn new(total_amount: Decimal) -> Self {
        Self {
            total_amount,
            balance_amount: total_amount,
            entries: Vec::new(),
            field_error: None,
        }
    }

    pub fn total_amount(&self) -> Decimal {
        self.total_amount
    }

    /// Amount still to be collected
    pub fn balance_amount(&self) -> Decimal {
        self.balance_amount
    }

    pub fn entries(&self) -> &[PaymentEntry] {
        &self.entries
    }

    pub fn entry(&self, account_id: i64) -> Option<&PaymentEntry> {
        self.entries.iter().find(|e| e.account_id == account_id)
    }

    /// Validation message for the payment-method field, if it is invalid
    pub fn field_error(&self) -> Option<&str> {
        self.field_error.as_deref()
    }

    /// Sum of all entry amounts
    pub fn allocated(&self) -> Decimal {
        self.entries.iter().map(|e| e.amount).sum()
    }

    pub fn phase(&self) -> Phase {
        if self.entries.is_empty() {
            Phase::Empty
        } else if self.balance_amount <= Decimal::ZERO {
            Phase::FullyAllocated
        } else {
            Phase::PartiallyAllocated
        }
    }

    pub fn is_fully_allocated(&self) -> bool {
        self.phase() == Phase::FullyAllocated
    }

    /// Whether selecting `account_id` would change anything.
    ///
    /// Once fully allocated only accounts that already hold an entry stay enabled.
    pub fn can_select(&self, account_id: i64) -> bool {
        self.entry(account_id).is_some() || self.balance_amount > Decimal::ZERO
    }

    /// Same state with the payment-method field marked invalid
    pub fn with_field_error(mut self, message: impl Into<String>) -> Self {
        self.field_error = Some(message.into());
        self
    }

    fn recompute_balance(&mut self) {
        self.balance_amount = if self.entries.is_empty() {
            self.total_amount
        } else {
            self.total_amount - self.allocated()
        };
    }
}

/// Apply one action and return the next state
pub fn reduce(mut state: AllocatorState, action: AllocatorAction) -> AllocatorState {
    match action {
        AllocatorAction::Select {
            account_id,
            account_name,
        } => {
            // The newly selected account absorbs whatever is still unpaid
            let contribution = state.balance_amount.max(Decimal::ZERO);
            if let Some(existing) = state.entries.iter_mut().find(|e| e.account_id == account_id) {
                existing.amount += contribution;
                debug!(account_id, amount = %existing.amount, "Merged repeat account selection");
            } else if contribution > Decimal::ZERO {
                state.entries.push(PaymentEntry {
                    account_id,
                    account_name,
                    amount: contribution,
                });
                debug!(account_id, amount = %contribution, "Added payment entry");
            } else {
                debug!(account_id, "Ignored selection, balance already covered");
                return state;
            }
            state.field_error = None;
            state.recompute_balance();
        }
        AllocatorAction::Remove(account_id) => {
            let Some(pos) = state.entries.iter().position(|e| e.account_id == account_id) else {
                debug!(account_id, "Remove ignored, no entry for account");
                return state;
            };
            state.entries.remove(pos);
            state.balance_amount = if state.entries.is_empty() {
                state.total_amount
            } else {
                // Equals the old balance plus the removed amount, floored at zero
                (state.total_amount - state.allocated()).max(Decimal::ZERO)
            };
            debug!(account_id, balance = %state.balance_amount, "Removed payment entry");
        }
        AllocatorAction::Clear => {
            state.entries.clear();
            state.balance_amount = state.total_amount;
            state.field_error = Some(PAYMENT_REQUIRED_MESSAGE.to_string());
        }
        AllocatorAction::TotalChanged(total) => {
            if let Err(e) = validate_amount(total, "total_amount") {
                warn!(error = %e, "Ignored invalid total refresh");
                return state;
            }
            state.total_amount = total;
            state.recompute_balance();
            debug!(total = %total, balance = %state.balance_amount, "Recomputed balance for new total");
        }
        AllocatorAction::AdjustAmount { account_id, amount } => {
            if let Err(e) = validate_amount(amount, "payment amount") {
                warn!(account_id, error = %e, "Ignored invalid amount adjustment");
                return state;
            }
            let Some(entry) = state.entries.iter_mut().find(|e| e.account_id == account_id) else {
                debug!(account_id, "Adjust ignored, no entry for account");
                return state;
            };
            entry.amount = amount;
            state.recompute_balance();
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idr(amount: i64) -> Decimal {
        Decimal::from(amount)
    }

    fn select(id: i64) -> AllocatorAction {
        AllocatorAction::Select {
            account_id: id,
            account_name: format!("Account {id}"),
        }
    }

    fn run(total: i64, actions: impl IntoIterator<Item = AllocatorAction>) -> AllocatorState {
        actions
            .into_iter()
            .fold(AllocatorState::new(idr(total)), reduce)
    }

    fn assert_consistent(state: &AllocatorState) {
        let mut ids: Vec<i64> = state.entries().iter().map(|e| e.account_id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), state.entries().len(), "duplicate account in {state:?}");
        if state.entries().is_empty() {
            assert_eq!(state.balance_amount(), state.total_amount());
        } else {
            let exact = state.balance_amount() + state.allocated() == state.total_amount();
            let floored = state.balance_amount().is_zero() && state.allocated() > state.total_amount();
            assert!(exact || floored, "balance out of sync in {state:?}");
        }
    }

    #[test]
    fn test_select_assigns_remaining_balance() {
        let state = run(100_000, [select(1)]);

        assert_eq!(state.entries().len(), 1);
        assert_eq!(state.entries()[0].account_id, 1);
        assert_eq!(state.entries()[0].amount, idr(100_000));
        assert_eq!(state.balance_amount(), Decimal::ZERO);
        assert_eq!(state.phase(), Phase::FullyAllocated);
    }

    #[test]
    fn test_remove_last_entry_restores_total() {
        let state = run(100_000, [select(1), AllocatorAction::Remove(1)]);

        assert!(state.entries().is_empty());
        assert_eq!(state.balance_amount(), idr(100_000));
        assert_eq!(state.phase(), Phase::Empty);
    }

    #[test]
    fn test_repeat_selection_merges() {
        let state = run(150_000, [select(1), select(1)]);

        assert_eq!(state.entries().len(), 1);
        assert_eq!(state.entries()[0].amount, idr(150_000));
        assert_eq!(state.balance_amount(), Decimal::ZERO);
    }

    #[test]
    fn test_new_account_disabled_when_fully_allocated() {
        let state = run(100_000, [select(1)]);
        assert!(state.can_select(1));
        assert!(!state.can_select(2));

        let after = reduce(state.clone(), select(2));
        assert_eq!(after, state);
    }

    #[test]
    fn test_split_payment_via_adjustment() {
        let state = run(
            100_000,
            [
                select(1),
                AllocatorAction::AdjustAmount {
                    account_id: 1,
                    amount: idr(40_000),
                },
            ],
        );
        assert_eq!(state.balance_amount(), idr(60_000));
        assert_eq!(state.phase(), Phase::PartiallyAllocated);
        assert!(state.can_select(2));

        let state = reduce(state, select(2));
        assert_eq!(state.entry(2).map(|e| e.amount), Some(idr(60_000)));
        assert_eq!(state.balance_amount(), Decimal::ZERO);

        let state = reduce(state, AllocatorAction::Remove(1));
        assert_eq!(state.balance_amount(), idr(40_000));
        assert_eq!(state.allocated(), idr(60_000));
    }

    #[test]
    fn test_remove_floors_balance_at_zero() {
        // Overpaid after a total drop: balance goes negative, removal floors it
        let state = run(
            100_000,
            [
                select(1),
                AllocatorAction::AdjustAmount {
                    account_id: 1,
                    amount: idr(30_000),
                },
                select(2),
                AllocatorAction::AdjustAmount {
                    account_id: 2,
                    amount: idr(150_000),
                },
            ],
        );
        assert_eq!(state.balance_amount(), idr(-80_000));

        let state = reduce(state, AllocatorAction::Remove(1));
        assert_eq!(state.balance_amount(), Decimal::ZERO);
        assert_eq!(state.entries().len(), 1);
    }

    #[test]
    fn test_clear_is_idempotent_and_marks_field() {
        let once = run(200_000, [select(1), AllocatorAction::Clear]);
        let twice = reduce(once.clone(), AllocatorAction::Clear);

        assert_eq!(once, twice);
        assert!(once.entries().is_empty());
        assert_eq!(once.balance_amount(), idr(200_000));
        assert_eq!(once.field_error(), Some(PAYMENT_REQUIRED_MESSAGE));

        let reselected = reduce(twice, select(3));
        assert!(reselected.field_error().is_none());
    }

    #[test]
    fn test_total_change_keeps_entries() {
        let state = run(
            100_000,
            [
                select(1),
                AllocatorAction::AdjustAmount {
                    account_id: 1,
                    amount: idr(70_000),
                },
                AllocatorAction::TotalChanged(idr(120_000)),
            ],
        );
        assert_eq!(state.entry(1).map(|e| e.amount), Some(idr(70_000)));
        assert_eq!(state.balance_amount(), idr(50_000));

        let empty = run(100_000, [AllocatorAction::TotalChanged(idr(90_000))]);
        assert_eq!(empty.balance_amount(), idr(90_000));

        let rejected = reduce(state.clone(), AllocatorAction::TotalChanged(idr(-1)));
        assert_eq!(rejected, state);
    }

    #[test]
    fn test_merge_equals_remove_then_readd_with_sum() {
        let base = run(
            100_000,
            [
                select(1),
                AllocatorAction::AdjustAmount {
                    account_id: 1,
                    amount: idr(25_000),
                },
            ],
        );
        let merged = reduce(base.clone(), select(1));

        let readded = reduce(
            reduce(reduce(base.clone(), AllocatorAction::Remove(1)), select(1)),
            AllocatorAction::AdjustAmount {
                account_id: 1,
                amount: idr(25_000) + base.balance_amount(),
            },
        );

        assert_eq!(merged.entries(), readded.entries());
        assert_eq!(merged.balance_amount(), readded.balance_amount());
    }

    #[test]
    fn test_unknown_ids_are_ignored() {
        let state = run(50_000, [select(1)]);
        assert_eq!(reduce(state.clone(), AllocatorAction::Remove(9)), state);
        assert_eq!(
            reduce(
                state.clone(),
                AllocatorAction::AdjustAmount {
                    account_id: 9,
                    amount: idr(1)
                }
            ),
            state
        );
    }

    #[test]
    fn test_invariants_hold_across_action_sequences() {
        let script = [
            select(1),
            select(2),
            AllocatorAction::AdjustAmount {
                account_id: 1,
                amount: idr(10_000),
            },
            select(2),
            select(3),
            select(1),
            AllocatorAction::Remove(2),
            AllocatorAction::TotalChanged(idr(80_000)),
            select(3),
            AllocatorAction::Remove(3),
            AllocatorAction::Clear,
            select(2),
            select(2),
            AllocatorAction::Remove(2),
        ];

        // Every prefix of every rotation of the script
        for start in 0..script.len() {
            let mut state = AllocatorState::new(idr(100_000));
            for action in script.iter().cycle().skip(start).take(script.len()) {
                state = reduce(state, action.clone());
                assert_consistent(&state);
            }
        }
    }
}
