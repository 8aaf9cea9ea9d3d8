//! Client configuration
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | GYM_API_URL | http://localhost:8000/api | API base URL |
//! | GYM_API_TOKEN | - | Bearer token of a stored session |
//! | GYM_CLUB_ID | - | Club the operator works at |
//! | GYM_REQUEST_TIMEOUT_SECS | 30 | Request timeout |
//! | GYM_ACCOUNTS_PER_PAGE | 20 | Page size of the payment-method selector |

use crate::{ClientResult, HttpClient};

const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_ACCOUNTS_PER_PAGE: u32 = 20;

/// Client configuration for connecting to the gym-management API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:8000/api")
    pub base_url: String,

    /// Bearer token for authentication
    pub token: Option<String>,

    /// Club the operator works at
    pub club_id: Option<i64>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Accounts fetched per page by the payment-method selector
    pub accounts_per_page: u32,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            club_id: None,
            timeout: DEFAULT_TIMEOUT_SECS,
            accounts_per_page: DEFAULT_ACCOUNTS_PER_PAGE,
        }
    }

    /// Load configuration from environment variables
    ///
    /// Unset or unparsable variables fall back to their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::new(lookup("GYM_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into()));
        config.token = lookup("GYM_API_TOKEN").filter(|t| !t.is_empty());
        config.club_id = lookup("GYM_CLUB_ID").and_then(|v| v.parse().ok());
        config.timeout = lookup("GYM_REQUEST_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        config.accounts_per_page = lookup("GYM_ACCOUNTS_PER_PAGE")
            .and_then(|v| v.parse().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_ACCOUNTS_PER_PAGE);
        config
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the club
    pub fn with_club(mut self, club_id: i64) -> Self {
        self.club_id = Some(club_id);
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the payment-method page size
    pub fn with_accounts_per_page(mut self, per_page: u32) -> Self {
        self.accounts_per_page = per_page.max(1);
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> ClientResult<HttpClient> {
        HttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
