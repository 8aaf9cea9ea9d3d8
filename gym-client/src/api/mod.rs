//! Remote API endpoints grouped by resource

pub mod accounts;
pub mod sales;

pub use accounts::AccountPager;
pub use sales::CheckoutService;
