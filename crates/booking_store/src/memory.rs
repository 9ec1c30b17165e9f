//! In-memory store implementation for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use tokio::sync::RwLock;

use async_trait::async_trait;
use entities::{Appointment, NewAppointment, NewUser, STATUS_PENDING, User};

use crate::{BookingStore, StoreError, StoreResult};

/// In-memory implementation mirroring the SQL variants' semantics:
/// unique emails, enforced foreign key, descending creation order,
/// idempotent delete.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<i64, User>>,
    appointments: RwLock<HashMap<i64, Appointment>>,
    next_user_id: AtomicI64,
    next_appointment_id: AtomicI64,
}

impl MemoryStore {
    /// Creates a new in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn create_user(&self, user: NewUser) -> StoreResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(StoreError::already_exists("user", &user.email));
        }

        let id = self.next_user_id.fetch_add(1, Ordering::SeqCst) + 1;
        let created = User {
            id,
            email: user.email,
            password_hash: user.password_hash,
            full_name: user.full_name,
            phone: user.phone,
            created_at: chrono::Utc::now(),
        };
        users.insert(id, created.clone());
        Ok(created)
    }

    async fn get_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn list_appointments(&self, user_id: i64) -> StoreResult<Vec<Appointment>> {
        let appointments = self.appointments.read().await;
        let mut result: Vec<Appointment> = appointments
            .values()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(result)
    }

    async fn create_appointment(&self, appointment: NewAppointment) -> StoreResult<Appointment> {
        let users = self.users.read().await;
        if !users.contains_key(&appointment.user_id) {
            return Err(StoreError::ForeignKeyViolation(format!(
                "no user with id {}",
                appointment.user_id
            )));
        }
        drop(users);

        let mut appointments = self.appointments.write().await;
        let id = self.next_appointment_id.fetch_add(1, Ordering::SeqCst) + 1;
        let created = Appointment {
            id,
            user_id: appointment.user_id,
            patient_name: appointment.patient_name,
            phone: appointment.phone,
            email: appointment.email,
            specialty: appointment.specialty,
            doctor: appointment.doctor,
            date: appointment.date,
            time: appointment.time,
            symptoms: appointment.symptoms,
            status: STATUS_PENDING.to_string(),
            created_at: chrono::Utc::now(),
        };
        appointments.insert(id, created.clone());
        Ok(created)
    }

    async fn update_appointment_status(
        &self,
        id: i64,
        status: &str,
    ) -> StoreResult<Option<Appointment>> {
        let mut appointments = self.appointments.write().await;
        Ok(appointments.get_mut(&id).map(|appointment| {
            appointment.status = status.to_string();
            appointment.clone()
        }))
    }

    async fn delete_appointment(&self, id: i64) -> StoreResult<()> {
        let mut appointments = self.appointments.write().await;
        appointments.remove(&id);
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            password_hash: "$2b$10$hash".to_string(),
            full_name: "Alice A".to_string(),
            phone: "0912345678".to_string(),
        }
    }

    fn new_appointment(user_id: i64) -> NewAppointment {
        NewAppointment {
            user_id,
            patient_name: "Alice A".to_string(),
            phone: "0912345678".to_string(),
            email: None,
            specialty: "Tim Mạch".to_string(),
            doctor: None,
            date: "2025-01-10".to_string(),
            time: "09:00".to_string(),
            symptoms: None,
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = MemoryStore::new();

        let first = store.create_user(new_user("alice@x.com")).await.unwrap();
        let err = store.create_user(new_user("alice@x.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists { .. }));

        // First row unchanged.
        let found = store.get_user_by_email("alice@x.com").await.unwrap().unwrap();
        assert_eq!(found.id, first.id);
        assert_eq!(found.full_name, "Alice A");
    }

    #[tokio::test]
    async fn test_racing_registrations_admit_exactly_one() {
        let store = std::sync::Arc::new(MemoryStore::new());

        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(
                async move { store.create_user(new_user("alice@x.com")).await },
            ));
        }

        let mut admitted = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => admitted += 1,
                Err(e) => assert!(matches!(e, StoreError::AlreadyExists { .. })),
            }
        }
        assert_eq!(admitted, 1);
    }

    #[tokio::test]
    async fn test_appointment_requires_existing_user() {
        let store = MemoryStore::new();

        let err = store.create_appointment(new_appointment(42)).await.unwrap_err();
        assert!(matches!(err, StoreError::ForeignKeyViolation(_)));
    }

    #[tokio::test]
    async fn test_appointment_created_pending_and_listed() {
        let store = MemoryStore::new();
        let user = store.create_user(new_user("alice@x.com")).await.unwrap();

        let created = store.create_appointment(new_appointment(user.id)).await.unwrap();
        assert_eq!(created.status, STATUS_PENDING);

        let listed = store.list_appointments(user.id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], created);
    }

    #[tokio::test]
    async fn test_list_orders_most_recent_first() {
        let store = MemoryStore::new();
        let user = store.create_user(new_user("alice@x.com")).await.unwrap();

        let a = store.create_appointment(new_appointment(user.id)).await.unwrap();
        let b = store.create_appointment(new_appointment(user.id)).await.unwrap();

        let listed = store.list_appointments(user.id).await.unwrap();
        assert_eq!(listed[0].id, b.id);
        assert_eq!(listed[1].id, a.id);
    }

    #[tokio::test]
    async fn test_list_for_unknown_user_is_empty() {
        let store = MemoryStore::new();
        assert!(store.list_appointments(99).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_status_miss_returns_none() {
        let store = MemoryStore::new();
        let user = store.create_user(new_user("alice@x.com")).await.unwrap();
        let created = store.create_appointment(new_appointment(user.id)).await.unwrap();

        let updated = store
            .update_appointment_status(created.id, "confirmed")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, "confirmed");

        let missing = store.update_appointment_status(999, "confirmed").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = MemoryStore::new();
        let user = store.create_user(new_user("alice@x.com")).await.unwrap();
        let created = store.create_appointment(new_appointment(user.id)).await.unwrap();

        store.delete_appointment(created.id).await.unwrap();
        // Deleting again is not an error.
        store.delete_appointment(created.id).await.unwrap();

        assert!(store.list_appointments(user.id).await.unwrap().is_empty());
    }
}
