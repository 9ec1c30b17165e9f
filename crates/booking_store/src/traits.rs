//! Store trait definition.

use std::path::Path;

use async_trait::async_trait;
use entities::{Appointment, NewAppointment, NewUser, User};

use crate::StoreResult;

/// Trait for user and appointment storage operations.
///
/// Handlers receive an implementation by reference through the application
/// state, so tests can substitute an isolated store per test.
#[async_trait]
pub trait BookingStore: Send + Sync {
    // =========================================================================
    // User operations
    // =========================================================================

    /// Creates a new user. The store assigns id and creation timestamp.
    ///
    /// Returns [`StoreError::AlreadyExists`] when the email is taken,
    /// including when a concurrent registration wins the race. The unique
    /// constraint is the authority, not any pre-check.
    ///
    /// [`StoreError::AlreadyExists`]: crate::StoreError::AlreadyExists
    async fn create_user(&self, user: NewUser) -> StoreResult<User>;

    /// Gets a user by exact email match.
    async fn get_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    // =========================================================================
    // Appointment operations
    // =========================================================================

    /// Lists a user's appointments, most recent first. Empty for unknown
    /// users, never an error.
    async fn list_appointments(&self, user_id: i64) -> StoreResult<Vec<Appointment>>;

    /// Creates a new appointment with status `"pending"`.
    ///
    /// Returns [`StoreError::ForeignKeyViolation`] when the owning user does
    /// not exist. Every variant enforces this.
    ///
    /// [`StoreError::ForeignKeyViolation`]: crate::StoreError::ForeignKeyViolation
    async fn create_appointment(&self, appointment: NewAppointment) -> StoreResult<Appointment>;

    /// Sets the status of an appointment and returns the updated row, or
    /// `None` when no row has that id.
    async fn update_appointment_status(
        &self,
        id: i64,
        status: &str,
    ) -> StoreResult<Option<Appointment>>;

    /// Deletes an appointment by id. Idempotent: deleting a missing id
    /// succeeds.
    async fn delete_appointment(&self, id: i64) -> StoreResult<()>;

    // =========================================================================
    // Health
    // =========================================================================

    /// Runs a trivial connectivity probe.
    async fn ping(&self) -> StoreResult<()>;

    /// Path of the backing database file, for the embedded variant only.
    fn backing_file(&self) -> Option<&Path> {
        None
    }
}
