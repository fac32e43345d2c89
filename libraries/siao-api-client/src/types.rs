//! Request and response types for the content API.

use serde::{Deserialize, Serialize};

// =============================================================================
// Envelope
// =============================================================================

/// Wrapper some endpoints put around their payload.
///
/// Other endpoints answer with the bare payload. A top-level object with a
/// `data` key is treated as an envelope.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub success: Option<bool>,
}

// =============================================================================
// Authentication Types
// =============================================================================

/// Request body for the login endpoint.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response from a successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub user: User,
}

/// The signed-in user, as far as the player cares.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    /// Numeric or string, depending on the backend
    pub id: serde_json::Value,
    pub name: Option<String>,
    pub email: Option<String>,
}
