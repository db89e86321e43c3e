//! Client-related types shared between the service client and the POS core
//!
//! Common request/response types used in API communication.

use serde::{Deserialize, Serialize};

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// User information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    /// Role name, e.g. "admin" or "waiter"; admin gates catalog mutation
    pub role: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl UserInfo {
    /// Whether this user may mutate the catalog
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

/// Current user response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUserResponse {
    pub id: String,
    pub username: String,
    pub role: String,
    pub permissions: Vec<String>,
}
