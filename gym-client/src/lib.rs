//! Gym Client - HTTP client for the gym-management API
//!
//! Provides network-based calls to the remote service, the checkout form
//! controller built on the shared payment allocator, and the application
//! context front ends pass around.

pub mod api;
pub mod checkout_form;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod logger;
pub mod session;

pub use api::{AccountPager, CheckoutService};
pub use checkout_form::{CheckoutForm, Notice, NoticeLevel};
pub use client::GymClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use session::{AppContext, Preferences, Session, Theme};

// Re-export shared types for convenience
pub use shared::checkout::{AllocatorAction, AllocatorState, CheckoutDraft, SaveMode};
pub use shared::client::{LoginResponse, UserInfo};
