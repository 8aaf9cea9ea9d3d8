//! Client-related types
//!
//! Auth request/response types used in API communication with the
//! gym-management service.

use crate::types::Permission;
use serde::{Deserialize, Serialize};

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// User information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    /// Club the operator works at, if bound to one
    #[serde(default)]
    pub club_id: Option<i64>,
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

impl UserInfo {
    /// Whether any of the user's permissions grants `action`
    pub fn can(&self, action: &str) -> bool {
        self.permissions.iter().any(|p| p.grants(action))
    }
}
