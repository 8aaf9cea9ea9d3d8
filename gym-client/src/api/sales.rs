//! Sale endpoints

use crate::{ClientResult, HttpClient};
use async_trait::async_trait;
use shared::checkout::CheckoutRequest;
use shared::models::Sale;
use shared::response::DataResponse;

/// Remote side of a checkout save
///
/// The checkout form only needs this one call, which keeps it testable
/// without a server.
#[async_trait]
pub trait CheckoutService: Send + Sync {
    async fn submit_checkout(&self, request: &CheckoutRequest) -> ClientResult<Sale>;
}

impl HttpClient {
    /// `POST sales/checkout`
    pub async fn checkout(&self, request: &CheckoutRequest) -> ClientResult<Sale> {
        self.post::<DataResponse<Sale>, _>("sales/checkout", request)
            .await
            .map(|r| r.data)
    }

    /// `GET sales/{code}`
    pub async fn get_sale(&self, code: &str) -> ClientResult<Sale> {
        self.get::<DataResponse<Sale>>(&format!("sales/{code}"))
            .await
            .map(|r| r.data)
    }
}

#[async_trait]
impl CheckoutService for HttpClient {
    async fn submit_checkout(&self, request: &CheckoutRequest) -> ClientResult<Sale> {
        self.checkout(request).await
    }
}
