//! Entity definitions for the hospital appointment service.
//!
//! These types are shared between the storage layer, the HTTP server and the
//! API client. Wire serialization uses camelCase field names.

mod appointment;
mod user;

pub use appointment::*;
pub use user::*;
