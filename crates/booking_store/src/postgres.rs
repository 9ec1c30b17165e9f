//! PostgreSQL store implementation (client-server database).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use entities::{Appointment, NewAppointment, NewUser, STATUS_PENDING, User};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, Connection, PgPool};

use crate::{BookingStore, StoreError, StoreResult, map_insert_error};

/// Fixed connection pool size. Exhaustion queues requests, it never fails
/// them.
const POOL_SIZE: u32 = 10;

/// Database created when the URL names one that does not exist yet.
const MAINTENANCE_DATABASE: &str = "postgres";

/// SQL schema definition. Idempotent: never drops or alters existing data.
///
/// Date and time are stored as text on purpose: the API contract performs no
/// format validation, so typed columns here would make one variant stricter
/// than the other.
const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id BIGSERIAL PRIMARY KEY,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    full_name TEXT NOT NULL,
    phone TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE IF NOT EXISTS appointments (
    id BIGSERIAL PRIMARY KEY,
    user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    patient_name TEXT NOT NULL,
    phone TEXT NOT NULL,
    email TEXT,
    specialty TEXT NOT NULL,
    doctor TEXT,
    date TEXT NOT NULL,
    time TEXT NOT NULL,
    symptoms TEXT,
    status TEXT NOT NULL DEFAULT 'pending',
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX IF NOT EXISTS idx_appointments_user ON appointments(user_id);
"#;

/// Client-server store backed by PostgreSQL with a bounded connection pool.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connects to the database named by the URL and initializes the schema.
    ///
    /// When the database itself is missing it is created through the
    /// maintenance database first. Unrecoverable connect failures are logged
    /// with a diagnostic hint before being returned; the caller is expected
    /// to treat them as fatal.
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let options: PgConnectOptions = url.parse::<PgConnectOptions>()?;

        let pool = match Self::open_pool(options.clone()).await {
            Ok(pool) => pool,
            Err(e) if is_database_missing(&e) => {
                create_database(&options).await?;
                Self::open_pool(options).await.map_err(|e| {
                    log_connect_hint(&e);
                    StoreError::Database(e)
                })?
            }
            Err(e) => {
                log_connect_hint(&e);
                return Err(e.into());
            }
        };

        let store = Self { pool };
        store.run_migrations().await?;

        tracing::info!("Connected to PostgreSQL database");
        Ok(store)
    }

    async fn open_pool(options: PgConnectOptions) -> Result<PgPool, sqlx::Error> {
        PgPoolOptions::new()
            .max_connections(POOL_SIZE)
            .connect_with(options)
            .await
    }

    /// Runs the idempotent schema initialization.
    async fn run_migrations(&self) -> StoreResult<()> {
        sqlx::raw_sql(SCHEMA_SQL).execute(&self.pool).await?;
        Ok(())
    }
}

/// Creates the target database via the maintenance database.
async fn create_database(options: &PgConnectOptions) -> StoreResult<()> {
    let name = options
        .get_database()
        .unwrap_or("hospital_appointments")
        .to_string();

    let admin = options.clone().database(MAINTENANCE_DATABASE);
    let mut conn = admin.connect().await.map_err(|e| {
        log_connect_hint(&e);
        StoreError::Database(e)
    })?;

    let create = format!("CREATE DATABASE \"{}\"", name.replace('"', "\"\""));
    let result = sqlx::query(&create).execute(&mut conn).await;
    conn.close().await.ok();

    match result {
        Ok(_) => {
            tracing::info!(database = %name, "Created database");
            Ok(())
        }
        // Lost the creation race to another process.
        Err(e) if is_duplicate_database(&e) => Ok(()),
        Err(e) => {
            log_connect_hint(&e);
            Err(e.into())
        }
    }
}

fn is_duplicate_database(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.code().as_deref() == Some("42P04"))
}

fn is_database_missing(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.code().as_deref() == Some("3D000"))
}

fn is_access_denied(e: &sqlx::Error) -> bool {
    matches!(
        e,
        sqlx::Error::Database(db)
            if matches!(db.code().as_deref(), Some("28P01") | Some("28000"))
    )
}

fn is_connection_refused(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Io(io) if io.kind() == std::io::ErrorKind::ConnectionRefused)
}

/// Logs a diagnostic distinguishing the common startup failures.
fn log_connect_hint(e: &sqlx::Error) {
    if is_access_denied(e) {
        tracing::error!(
            error = %e,
            "Database access denied. Check that the credentials in DATABASE_URL are correct"
        );
    } else if is_connection_refused(e) {
        tracing::error!(
            error = %e,
            "Cannot reach the PostgreSQL server. Check that it is running and that the host in \
             DATABASE_URL is correct"
        );
    } else if is_database_missing(e) {
        tracing::error!(error = %e, "Database does not exist and could not be created");
    } else {
        tracing::error!(error = %e, "Database connection failed");
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    password_hash: String,
    full_name: String,
    phone: String,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
            full_name: row.full_name,
            phone: row.phone,
            created_at: row.created_at,
        }
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
    created_at: DateTime<Utc>,
}

impl From<AppointmentRow> for Appointment {
    fn from(row: AppointmentRow) -> Self {
        Appointment {
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
            created_at: row.created_at,
        }
    }
}

const APPOINTMENT_COLUMNS: &str = "id, user_id, patient_name, phone, email, specialty, doctor, \
                                   date, time, symptoms, status, created_at";

#[async_trait]
impl BookingStore for PgStore {
    async fn create_user(&self, user: NewUser) -> StoreResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            "INSERT INTO users (email, password_hash, full_name, phone) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, email, password_hash, full_name, phone, created_at",
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.full_name)
        .bind(&user.phone)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, "user", &user.email))?;

        Ok(row.into())
    }

    async fn get_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, password_hash, full_name, phone, created_at \
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn list_appointments(&self, user_id: i64) -> StoreResult<Vec<Appointment>> {
        let rows = sqlx::query_as::<_, AppointmentRow>(&format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Appointment::from).collect())
    }

    async fn create_appointment(&self, appointment: NewAppointment) -> StoreResult<Appointment> {
        let row = sqlx::query_as::<_, AppointmentRow>(&format!(
            "INSERT INTO appointments (user_id, patient_name, phone, email, specialty, doctor, \
             date, time, symptoms, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {APPOINTMENT_COLUMNS}"
        ))
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
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, "appointment", &appointment.patient_name))?;

        Ok(row.into())
    }

    async fn update_appointment_status(
        &self,
        id: i64,
        status: &str,
    ) -> StoreResult<Option<Appointment>> {
        let row = sqlx::query_as::<_, AppointmentRow>(&format!(
            "UPDATE appointments SET status = $1 WHERE id = $2 RETURNING {APPOINTMENT_COLUMNS}"
        ))
        .bind(status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Appointment::from))
    }

    async fn delete_appointment(&self, id: i64) -> StoreResult<()> {
        sqlx::query("DELETE FROM appointments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let refused = sqlx::Error::Io(std::io::Error::from(std::io::ErrorKind::ConnectionRefused));
        assert!(is_connection_refused(&refused));
        assert!(!is_database_missing(&refused));
        assert!(!is_access_denied(&refused));
    }
}
