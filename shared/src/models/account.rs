//! Account (Rekening) Model

use serde::{Deserialize, Serialize};

/// Financial account that can receive payments (cash drawer, bank account, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    /// Eligible as a payment method at checkout
    #[serde(default)]
    pub is_payment: bool,
}

impl Account {
    /// Whether this account may be offered in the payment-method selector
    pub fn is_selectable(&self) -> bool {
        self.is_active && self.is_payment
    }
}

/// List filter for the payment-method selector
///
/// Serialised as the query string of `GET rekening`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountQuery {
    pub page: u32,
    pub per_page: u32,
    /// `1` = enabled accounts only
    pub is_active: u8,
    /// `1` = payment-eligible accounts only
    pub is_payment: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub club_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl AccountQuery {
    /// Query for enabled, payment-eligible accounts starting at page 1
    pub fn payment_methods(per_page: u32) -> Self {
        Self {
            page: 1,
            per_page,
            is_active: 1,
            is_payment: 1,
            club_id: None,
            search: None,
        }
    }

    pub fn for_club(mut self, club_id: i64) -> Self {
        self.club_id = Some(club_id);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        self.search = (!term.trim().is_empty()).then_some(term);
        self
    }

    /// Same filter, different page
    pub fn at_page(&self, page: u32) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_methods_query_filters_enabled_and_payment() {
        let query = AccountQuery::payment_methods(20).for_club(7).search("  ");
        assert_eq!(query.page, 1);
        assert_eq!(query.is_active, 1);
        assert_eq!(query.is_payment, 1);
        assert_eq!(query.club_id, Some(7));
        assert!(query.search.is_none());

        let next = query.at_page(3);
        assert_eq!(next.page, 3);
        assert_eq!(next.per_page, 20);
        assert_eq!(next.club_id, Some(7));
    }

    #[test]
    fn test_account_deserialize_defaults() {
        let account: Account = serde_json::from_str(r#"{"id": 3, "name": "Kas"}"#).unwrap();
        assert_eq!(account.id, 3);
        assert!(account.account_number.is_none());
        assert!(!account.is_selectable());
    }
}
