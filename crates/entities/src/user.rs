//! User entity definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered patient account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Store-assigned identifier.
    pub id: i64,
    /// Email address (unique).
    pub email: String,
    /// Bcrypt hash of the password. Never serialized to any response.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Full name.
    pub full_name: String,
    /// Phone number.
    pub phone: String,
    /// When this record was created (store-assigned).
    pub created_at: DateTime<Utc>,
}

/// The public projection of a user returned by the API.
///
/// Carries no password material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPublic {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Returns the public projection of this user.
    pub fn public(&self) -> UserPublic {
        UserPublic {
            id: self.id,
            email: self.email.clone(),
            full_name: self.full_name.clone(),
            phone: self.phone.clone(),
            created_at: self.created_at,
        }
    }
}

/// Data required to create a user row. The store assigns id and timestamp.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub phone: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: 1,
            email: "alice@x.com".to_string(),
            password_hash: "$2b$10$abcdefghijklmnopqrstuv".to_string(),
            full_name: "Alice A".to_string(),
            phone: "0912345678".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_user_never_serializes_password_hash() {
        let user = sample_user();
        let json = serde_json::to_value(&user).unwrap();

        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
        assert!(json.get("password").is_none());
        assert_eq!(json["email"], "alice@x.com");
        assert_eq!(json["fullName"], "Alice A");
    }

    #[test]
    fn test_public_projection() {
        let user = sample_user();
        let public = user.public();

        assert_eq!(public.id, user.id);
        assert_eq!(public.email, user.email);

        let json = serde_json::to_value(&public).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["phone"], "0912345678");
    }
}
