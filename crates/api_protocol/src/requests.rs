//! Request body types.
//!
//! String fields default to empty when absent so the server can answer a
//! uniform `MISSING_FIELD` error for both missing and empty values.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Body of the booking endpoint.
///
/// Optional fields may be omitted or sent as empty strings; the server
/// stores both as NULL. Any client-supplied status is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentRequest {
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub patient_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub specialty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor: Option<String>,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symptoms: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAppointmentStatusRequest {
    #[serde(default)]
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_fields_default_to_empty() {
        let request: RegisterRequest = serde_json::from_str(r#"{"email":"alice@x.com"}"#).unwrap();
        assert_eq!(request.email, "alice@x.com");
        assert!(request.password.is_empty());
        assert!(request.full_name.is_empty());
    }

    #[test]
    fn test_client_supplied_status_is_not_part_of_the_contract() {
        // Unknown fields such as "status" are ignored on deserialization.
        let request: CreateAppointmentRequest = serde_json::from_str(
            r#"{"userId":1,"patientName":"Alice A","phone":"0912345678","specialty":"Tim Mạch","date":"2025-01-10","time":"09:00","status":"confirmed"}"#,
        )
        .unwrap();
        assert_eq!(request.user_id, Some(1));
        assert_eq!(request.patient_name, "Alice A");
    }
}
