//! Typed HTTP client for the hospital appointment API.

use api_protocol::{
    ApiErrorBody, AuthResponse, CreateAppointmentRequest, HealthResponse, LoginRequest,
    RegisterRequest, SuccessResponse, UpdateAppointmentStatusRequest,
};
use entities::Appointment;
use tracing::debug;

use crate::error::{ClientError, ClientResult};

/// Client for the hospital appointment server.
pub struct BookingClient {
    /// Server base URL, without trailing slash.
    base_url: String,
    /// HTTP client
    http_client: reqwest::Client,
}

impl BookingClient {
    /// Create a new client for the server at `base_url`.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Decode a response, turning non-2xx statuses into [`ClientError::Api`].
    async fn parse<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> ClientResult<T> {
        let status = response.status();
        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| ClientError::Deserialization(e.to_string()));
        }

        let body: ApiErrorBody = response
            .json()
            .await
            .map_err(|e| ClientError::Deserialization(e.to_string()))?;
        Err(ClientError::Api {
            status: status.as_u16(),
            code: body.error.code,
            message: body.error.message,
        })
    }

    async fn post<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &impl serde::Serialize,
    ) -> ClientResult<T> {
        debug!(path = %path, "POST");
        let response = self
            .http_client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        Self::parse(response).await
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        debug!(path = %path, "GET");
        let response = self
            .http_client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        Self::parse(response).await
    }

    /// Register a new account.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
        phone: &str,
    ) -> ClientResult<AuthResponse> {
        let request = RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            full_name: full_name.to_string(),
            phone: phone.to_string(),
        };
        self.post("/api/auth/register", &request).await
    }

    /// Log in with email and password.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<AuthResponse> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.post("/api/auth/login", &request).await
    }

    /// List a user's appointments, most recent first.
    pub async fn appointments(&self, user_id: i64) -> ClientResult<Vec<Appointment>> {
        self.get(&format!("/api/appointments/{user_id}")).await
    }

    /// Book a new appointment. The server assigns the id, the `"pending"`
    /// status, and the creation timestamp.
    pub async fn create_appointment(
        &self,
        request: CreateAppointmentRequest,
    ) -> ClientResult<Appointment> {
        self.post("/api/appointments", &request).await
    }

    /// Set an appointment's status.
    pub async fn update_appointment_status(
        &self,
        id: i64,
        status: &str,
    ) -> ClientResult<Appointment> {
        let request = UpdateAppointmentStatusRequest {
            status: status.to_string(),
        };
        debug!(id, status, "PUT appointment status");
        let response = self
            .http_client
            .put(format!("{}/api/appointments/{id}", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        Self::parse(response).await
    }

    /// Cancel an appointment. Succeeds even when the id does not exist.
    pub async fn delete_appointment(&self, id: i64) -> ClientResult<SuccessResponse> {
        debug!(id, "DELETE appointment");
        let response = self
            .http_client
            .delete(format!("{}/api/appointments/{id}", self.base_url))
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        Self::parse(response).await
    }

    /// Check server and store health.
    pub async fn health(&self) -> ClientResult<HealthResponse> {
        self.get("/api/health").await
    }
}

impl Clone for BookingClient {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            http_client: self.http_client.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation_strips_trailing_slash() {
        let client = BookingClient::new("http://localhost:3001/");
        assert_eq!(client.base_url, "http://localhost:3001");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_a_network_error() {
        // Port 1 is never bound; the connection is refused immediately.
        let client = BookingClient::new("http://127.0.0.1:1");
        let error = client.health().await.unwrap_err();
        assert!(matches!(error, ClientError::Network(_)));
    }
}
