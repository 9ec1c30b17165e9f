//! Appointment entity definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status assigned to every newly created appointment.
pub const STATUS_PENDING: &str = "pending";

/// A booked appointment, owned by a user via `user_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    /// Store-assigned identifier.
    pub id: i64,
    /// Owning user id (foreign key to users).
    pub user_id: i64,
    /// Patient name as entered in the booking form.
    pub patient_name: String,
    /// Contact phone number.
    pub phone: String,
    /// Optional contact email.
    pub email: Option<String>,
    /// Medical specialty (free text, suggested client-side).
    pub specialty: String,
    /// Optional requested doctor.
    pub doctor: Option<String>,
    /// Appointment date, `YYYY-MM-DD` by convention. Not validated.
    pub date: String,
    /// Appointment time, `HH:MM` by convention. Not validated.
    pub time: String,
    /// Optional symptoms or notes.
    pub symptoms: Option<String>,
    /// Free-text status, `"pending"` at creation.
    pub status: String,
    /// When this record was created (store-assigned).
    pub created_at: DateTime<Utc>,
}

/// Data required to book an appointment.
///
/// The store assigns id, timestamp and the initial `"pending"` status.
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub user_id: i64,
    pub patient_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub specialty: String,
    pub doctor: Option<String>,
    pub date: String,
    pub time: String,
    pub symptoms: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_field_names() {
        let appointment = Appointment {
            id: 7,
            user_id: 1,
            patient_name: "Alice A".to_string(),
            phone: "0912345678".to_string(),
            email: None,
            specialty: "Tim Mạch".to_string(),
            doctor: None,
            date: "2025-01-10".to_string(),
            time: "09:00".to_string(),
            symptoms: None,
            status: STATUS_PENDING.to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&appointment).unwrap();
        assert_eq!(json["userId"], 1);
        assert_eq!(json["patientName"], "Alice A");
        assert_eq!(json["date"], "2025-01-10");
        assert_eq!(json["time"], "09:00");
        assert_eq!(json["status"], "pending");
        assert!(json.get("createdAt").is_some());
    }
}
