//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

// ============================================================================
// Login
// ============================================================================

/// Login request (JSON body or form fields)
///
/// Both fields default to empty so that a partial body reaches the
/// "incomplete" check instead of failing deserialization.
#[derive(Clone, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginSuccess {
    pub title: String,
    pub status_code: u16,
    pub page: String,
    pub message: String,
    pub token: String,
    /// RFC 3339
    pub expiry: String,
}
