//! Response body types.

use entities::UserPublic;
use serde::{Deserialize, Serialize};

/// Body of successful register (201) and login (200) responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    pub user: UserPublic,
}

/// Body of the delete endpoint: `{"success": true}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Body of the health endpoint. Always returned with HTTP 200.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"ok"` when the store answers the probe, `"degraded"` otherwise.
    pub status: String,
    /// `"connected"`, `"disconnected"`, or `"not found"` when the embedded
    /// database file is missing.
    pub database: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_response_shape() {
        let json = r#"{"success":true,"user":{"id":1,"email":"alice@x.com","fullName":"Alice A","phone":"0912345678","createdAt":"2025-01-02T03:04:05Z"}}"#;
        let response: AuthResponse = serde_json::from_str(json).unwrap();
        assert!(response.success);
        assert_eq!(response.user.full_name, "Alice A");
    }
}
