//! API Response types
//!
//! Envelopes used by the gym-management API:
//! ```json
//! { "data": { ... } }
//! { "data": [ ... ], "meta": { "page": 1, "total_page": 4 } }
//! ```

use serde::{Deserialize, Serialize};

/// Single-object response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
    /// Human-readable message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Pagination metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Current page number (1-based)
    pub page: u32,
    /// Total number of pages
    pub total_page: u32,
}

impl PageMeta {
    pub fn has_next(&self) -> bool {
        self.page < self.total_page
    }
}

/// Paginated list response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

/// Error body returned on non-2xx responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<serde_json::Value>,
}
