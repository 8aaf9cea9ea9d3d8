//! Account (Rekening) endpoints
//!
//! The payment-method selector loads accounts page by page as the user
//! scrolls; [`AccountPager`] keeps track of where it is.

use crate::{ClientResult, HttpClient};
use shared::models::{Account, AccountQuery};
use shared::response::Page;
use tracing::debug;

impl HttpClient {
    /// `GET rekening` for one page
    pub async fn list_accounts(&self, query: &AccountQuery) -> ClientResult<Page<Account>> {
        self.get_query("rekening", query).await
    }
}

/// Incremental loader for the payment-method selector
#[derive(Debug)]
pub struct AccountPager<'a> {
    client: &'a HttpClient,
    query: AccountQuery,
    next_page: Option<u32>,
    loaded: Vec<Account>,
}

impl<'a> AccountPager<'a> {
    pub fn new(client: &'a HttpClient, query: AccountQuery) -> Self {
        let first = query.page.max(1);
        Self {
            client,
            query,
            next_page: Some(first),
            loaded: Vec::new(),
        }
    }

    /// Whether another page can be requested
    pub fn has_more(&self) -> bool {
        self.next_page.is_some()
    }

    /// Every account loaded so far, in page order
    pub fn loaded(&self) -> &[Account] {
        &self.loaded
    }

    /// Fetch the next page, or `None` once the last page has been read.
    ///
    /// A failed request leaves the cursor where it was so the caller can retry.
    pub async fn next_page(&mut self) -> ClientResult<Option<Vec<Account>>> {
        let Some(page) = self.next_page else {
            return Ok(None);
        };

        let response = self.client.list_accounts(&self.query.at_page(page)).await?;
        self.next_page = response.meta.has_next().then(|| response.meta.page + 1);

        // The server filter is authoritative, but never offer a disabled account
        let batch: Vec<Account> = response
            .data
            .into_iter()
            .filter(Account::is_selectable)
            .collect();
        debug!(
            page,
            total_page = response.meta.total_page,
            count = batch.len(),
            "Loaded payment accounts"
        );

        self.loaded.extend(batch.iter().cloned());
        Ok(Some(batch))
    }

    /// Read every remaining page
    pub async fn collect_all(mut self) -> ClientResult<Vec<Account>> {
        while self.next_page().await?.is_some() {}
        Ok(self.loaded)
    }
}
