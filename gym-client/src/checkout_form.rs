//! Checkout form controller
//!
//! Owns one allocator for one sale being checked out (or paid off) and the
//! single save that may be in flight for it. Saving is split in two halves,
//! [`CheckoutForm::begin_save`] and [`CheckoutForm::finish_save`], so a UI can
//! keep its buttons disabled in between; [`CheckoutForm::save`] runs both.

use crate::api::CheckoutService;
use crate::ClientResult;
use shared::CheckoutError;
use shared::checkout::{
    AllocatorAction, AllocatorState, CheckoutDraft, CheckoutRequest, SaleTotals, SaveMode,
    build_request, compute_totals, reduce,
};
use shared::models::{Discount, Sale};
use shared::Decimal;
use tracing::{debug, info, warn};

/// Severity of a transient notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Dismissible notification shown after a save
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Checkout form state
#[derive(Debug, Clone)]
pub struct CheckoutForm {
    draft: CheckoutDraft,
    totals: SaleTotals,
    allocator: AllocatorState,
    saving: bool,
    notice: Option<Notice>,
}

impl CheckoutForm {
    /// New checkout for a cart.
    ///
    /// Credit pulled from earlier sales (`refund_from`) lowers what is still owed.
    pub fn from_cart(
        draft: CheckoutDraft,
        promo: Option<&Discount>,
        tax_percent: Decimal,
    ) -> ClientResult<Self> {
        let totals = compute_totals(&draft.items, promo, tax_percent)?;
        let credit: Decimal = draft.refund_from.iter().map(|r| r.amount).sum();
        let outstanding = (totals.total_amount - credit).max(Decimal::ZERO);
        debug!(
            total = %totals.total_amount,
            credit = %credit,
            outstanding = %outstanding,
            "Opened checkout form"
        );

        Ok(Self {
            draft,
            totals,
            allocator: AllocatorState::new(outstanding),
            saving: false,
            notice: None,
        })
    }

    /// Payment recording for an existing sale; only its balance is still owed
    pub fn for_sale(sale: &Sale) -> Self {
        let draft = CheckoutDraft {
            club_id: sale.club_id,
            member_id: sale.member_id,
            items: sale.items.clone(),
            refund_from: Vec::new(),
        };
        let totals = SaleTotals {
            gross_amount: sale.gross_amount,
            discount: sale.discount,
            tax: sale.tax,
            total_amount: sale.total_amount,
        };

        Self {
            draft,
            totals,
            allocator: AllocatorState::new(sale.balance_amount),
            saving: false,
            notice: None,
        }
    }

    pub fn draft(&self) -> &CheckoutDraft {
        &self.draft
    }

    pub fn totals(&self) -> &SaleTotals {
        &self.totals
    }

    pub fn allocator(&self) -> &AllocatorState {
        &self.allocator
    }

    /// Whether a save request is pending; the form is read-only meanwhile
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Apply a payment-method selector event
    pub fn dispatch(&mut self, action: AllocatorAction) {
        if self.saving {
            debug!(?action, "Ignored allocator action while saving");
            return;
        }
        self.allocator = reduce(std::mem::take(&mut self.allocator), action);
    }

    /// Re-fetched sale: keep the user's entries, correct the balance.
    ///
    /// Applies even while a save is pending; only user edits are locked then.
    pub fn refresh_total(&mut self, sale: &Sale) {
        self.totals.total_amount = sale.total_amount;
        self.allocator = reduce(
            std::mem::take(&mut self.allocator),
            AllocatorAction::TotalChanged(sale.balance_amount),
        );
    }

    /// Validate and build the request for `mode`, marking the form as saving.
    ///
    /// On a validation failure the payment field is marked invalid and nothing
    /// should be sent.
    pub fn begin_save(&mut self, mode: SaveMode) -> ClientResult<CheckoutRequest> {
        if self.saving {
            return Err(CheckoutError::SaveInFlight.into());
        }

        match build_request(&self.allocator, &self.draft, mode) {
            Ok(request) => {
                self.saving = true;
                self.notice = None;
                Ok(request)
            }
            Err(e) => {
                warn!(?mode, error = %e, "Checkout blocked by validation");
                if e.is_field_error() {
                    self.allocator = std::mem::take(&mut self.allocator).with_field_error(e.to_string());
                }
                Err(e.into())
            }
        }
    }

    /// Record the outcome of the request started by [`Self::begin_save`].
    ///
    /// Success resets the allocator to the saved sale's balance; failure leaves
    /// it untouched so the user can retry.
    pub fn finish_save(&mut self, result: ClientResult<Sale>) -> ClientResult<Sale> {
        if !self.saving {
            warn!("finish_save called without a pending save");
        }
        self.saving = false;

        match result {
            Ok(sale) => {
                info!(
                    code = %sale.code,
                    balance = %sale.balance_amount,
                    is_paid = ?sale.is_paid,
                    "Checkout saved"
                );
                self.allocator = AllocatorState::new(sale.balance_amount);
                self.totals.total_amount = sale.total_amount;
                self.notice = Some(Notice {
                    level: NoticeLevel::Success,
                    message: format!("Transaction {} saved", sale.code),
                });
                Ok(sale)
            }
            Err(e) => {
                warn!(error = %e, "Checkout save failed, keeping form state");
                self.notice = Some(Notice {
                    level: NoticeLevel::Error,
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Validate, submit and record the outcome
    pub async fn save<S>(&mut self, mode: SaveMode, service: &S) -> ClientResult<Sale>
    where
        S: CheckoutService + ?Sized,
    {
        let request = self.begin_save(mode)?;
        let result = service.submit_checkout(&request).await;
        self.finish_save(result)
    }
}

