//! Consumer-side library for the hospital appointment service.
//!
//! [`BookingClient`] is a typed HTTP client for the server's API, and
//! [`SessionStore`] persists the logged-in user between runs.

mod api;
mod error;
mod session;

pub use api::BookingClient;
pub use error::{ClientError, ClientResult};
pub use session::SessionStore;
