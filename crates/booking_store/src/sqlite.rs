//! SQLite store implementation (embedded single-file database).

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use entities::{Appointment, NewAppointment, NewUser, STATUS_PENDING, User};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};

use crate::{BookingStore, StoreResult, map_insert_error};

/// SQL schema definition. Idempotent: never drops or alters existing data.
const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    full_name TEXT NOT NULL,
    phone TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS appointments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    patient_name TEXT NOT NULL,
    phone TEXT NOT NULL,
    email TEXT,
    specialty TEXT NOT NULL,
    doctor TEXT,
    date TEXT NOT NULL,
    time TEXT NOT NULL,
    symptoms TEXT,
    status TEXT NOT NULL DEFAULT 'pending',
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_appointments_user ON appointments(user_id);
"#;

/// Embedded store backed by a single SQLite file.
///
/// The pool is capped at one connection, so all queries serialize at the
/// store level. Foreign keys are switched on per connection; SQLite leaves
/// them off by default.
pub struct SqliteStore {
    pool: Pool<Sqlite>,
    path: Option<PathBuf>,
}

impl SqliteStore {
    /// Opens (creating if missing) the database at the given URL, e.g.
    /// `sqlite:hospital.db?mode=rwc`, and initializes the schema.
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let options: SqliteConnectOptions = url.parse::<SqliteConnectOptions>()?;
        let options = options.create_if_missing(true).foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        let store = Self {
            pool,
            path: file_path_of(url),
        };
        store.run_migrations().await?;

        tracing::info!(url = %url, "Connected to SQLite database");
        Ok(store)
    }

    /// Runs the idempotent schema initialization.
    async fn run_migrations(&self) -> StoreResult<()> {
        sqlx::raw_sql(SCHEMA_SQL).execute(&self.pool).await?;
        Ok(())
    }

    async fn get_appointment(&self, id: i64) -> StoreResult<Option<Appointment>> {
        let row = sqlx::query_as::<_, AppointmentRow>(
            "SELECT id, user_id, patient_name, phone, email, specialty, doctor, date, time, \
             symptoms, status, created_at FROM appointments WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Appointment::try_from).transpose()
    }
}

/// Extracts the database file path from a sqlite URL, if it names a file.
fn file_path_of(url: &str) -> Option<PathBuf> {
    let raw = url.strip_prefix("sqlite://").or_else(|| url.strip_prefix("sqlite:"))?;
    let raw = raw.split('?').next().unwrap_or(raw);
    if raw.is_empty() || raw == ":memory:" {
        None
    } else {
        Some(PathBuf::from(raw))
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    password_hash: String,
    full_name: String,
    phone: String,
    created_at: String,
}

impl TryFrom<UserRow> for User {
    type Error = crate::StoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
            full_name: row.full_name,
            phone: row.phone,
            created_at: parse_timestamp(&row.created_at)?,
        })
    }
}

#[derive(sqlx::FromRow)]
struct AppointmentRow {
    id: i64,
    user_id: i64,
    patient_name: String,
    phone: String,
    email: Option<String>,
    specialty: String,
    doctor: Option<String>,
    date: String,
    time: String,
    symptoms: Option<String>,
    status: String,
    created_at: String,
}

impl TryFrom<AppointmentRow> for Appointment {
    type Error = crate::StoreError;

    fn try_from(row: AppointmentRow) -> Result<Self, Self::Error> {
        Ok(Appointment {
            id: row.id,
            user_id: row.user_id,
            patient_name: row.patient_name,
            phone: row.phone,
            email: row.email,
            specialty: row.specialty,
            doctor: row.doctor,
            date: row.date,
            time: row.time,
            symptoms: row.symptoms,
            status: row.status,
            created_at: parse_timestamp(&row.created_at)?,
        })
    }
}

/// Timestamps are stored as RFC 3339 text, which also sorts correctly.
fn parse_timestamp(raw: &str) -> StoreResult<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(raw)?.with_timezone(&Utc))
}

#[async_trait]
impl BookingStore for SqliteStore {
    async fn create_user(&self, user: NewUser) -> StoreResult<User> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO users (email, password_hash, full_name, phone, created_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.full_name)
        .bind(&user.phone)
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, "user", &user.email))?;

        Ok(User {
            id: result.last_insert_rowid(),
            email: user.email,
            password_hash: user.password_hash,
            full_name: user.full_name,
            phone: user.phone,
            created_at: now,
        })
    }

    async fn get_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, password_hash, full_name, phone, created_at \
             FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn list_appointments(&self, user_id: i64) -> StoreResult<Vec<Appointment>> {
        let rows = sqlx::query_as::<_, AppointmentRow>(
            "SELECT id, user_id, patient_name, phone, email, specialty, doctor, date, time, \
             symptoms, status, created_at FROM appointments WHERE user_id = ? \
             ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Appointment::try_from).collect()
    }

    async fn create_appointment(&self, appointment: NewAppointment) -> StoreResult<Appointment> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO appointments (user_id, patient_name, phone, email, specialty, doctor, \
             date, time, symptoms, status, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(appointment.user_id)
        .bind(&appointment.patient_name)
        .bind(&appointment.phone)
        .bind(&appointment.email)
        .bind(&appointment.specialty)
        .bind(&appointment.doctor)
        .bind(&appointment.date)
        .bind(&appointment.time)
        .bind(&appointment.symptoms)
        .bind(STATUS_PENDING)
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, "appointment", &appointment.patient_name))?;

        Ok(Appointment {
            id: result.last_insert_rowid(),
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
            created_at: now,
        })
    }

    async fn update_appointment_status(
        &self,
        id: i64,
        status: &str,
    ) -> StoreResult<Option<Appointment>> {
        let result = sqlx::query("UPDATE appointments SET status = ? WHERE id = ?")
            .bind(status)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_appointment(id).await
    }

    async fn delete_appointment(&self, id: i64) -> StoreResult<()> {
        sqlx::query("DELETE FROM appointments WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backing_file(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_path_of() {
        assert_eq!(
            file_path_of("sqlite:hospital.db?mode=rwc"),
            Some(PathBuf::from("hospital.db"))
        );
        assert_eq!(
            file_path_of("sqlite:///var/lib/hospital.db"),
            Some(PathBuf::from("/var/lib/hospital.db"))
        );
        assert_eq!(file_path_of("sqlite::memory:"), None);
        assert_eq!(file_path_of("postgres://localhost/hospital"), None);
    }

    #[tokio::test]
    async fn test_schema_init_is_idempotent() {
        let store = SqliteStore::connect("sqlite::memory:").await.unwrap();
        // Running the migration again must not fail or drop data.
        store
            .create_user(NewUser {
                email: "alice@x.com".to_string(),
                password_hash: "$2b$10$hash".to_string(),
                full_name: "Alice A".to_string(),
                phone: "0912345678".to_string(),
            })
            .await
            .unwrap();
        store.run_migrations().await.unwrap();

        let user = store.get_user_by_email("alice@x.com").await.unwrap();
        assert!(user.is_some());
    }

    #[tokio::test]
    async fn test_unique_email_maps_to_already_exists() {
        let store = SqliteStore::connect("sqlite::memory:").await.unwrap();
        let user = NewUser {
            email: "alice@x.com".to_string(),
            password_hash: "$2b$10$hash".to_string(),
            full_name: "Alice A".to_string(),
            phone: "0912345678".to_string(),
        };

        store.create_user(user.clone()).await.unwrap();
        let err = store.create_user(user).await.unwrap_err();
        assert!(matches!(err, crate::StoreError::AlreadyExists { .. }));
    }

    #[tokio::test]
    async fn test_foreign_key_enforced() {
        let store = SqliteStore::connect("sqlite::memory:").await.unwrap();

        let err = store
            .create_appointment(NewAppointment {
                user_id: 42,
                patient_name: "Alice A".to_string(),
                phone: "0912345678".to_string(),
                email: None,
                specialty: "Tim Mạch".to_string(),
                doctor: None,
                date: "2025-01-10".to_string(),
                time: "09:00".to_string(),
                symptoms: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, crate::StoreError::ForeignKeyViolation(_)));
    }

    #[tokio::test]
    async fn test_appointment_round_trip() {
        let store = SqliteStore::connect("sqlite::memory:").await.unwrap();
        let user = store
            .create_user(NewUser {
                email: "alice@x.com".to_string(),
                password_hash: "$2b$10$hash".to_string(),
                full_name: "Alice A".to_string(),
                phone: "0912345678".to_string(),
            })
            .await
            .unwrap();

        let created = store
            .create_appointment(NewAppointment {
                user_id: user.id,
                patient_name: "Alice A".to_string(),
                phone: "0912345678".to_string(),
                email: None,
                specialty: "Tim Mạch".to_string(),
                doctor: Some("Dr. Binh".to_string()),
                date: "2025-01-10".to_string(),
                time: "09:00".to_string(),
                symptoms: None,
            })
            .await
            .unwrap();
        assert_eq!(created.status, STATUS_PENDING);

        let listed = store.list_appointments(user.id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].doctor.as_deref(), Some("Dr. Binh"));

        let updated = store
            .update_appointment_status(created.id, "confirmed")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, "confirmed");

        assert!(store.update_appointment_status(999, "x").await.unwrap().is_none());

        store.delete_appointment(created.id).await.unwrap();
        store.delete_appointment(created.id).await.unwrap();
        assert!(store.list_appointments(user.id).await.unwrap().is_empty());
    }
}
