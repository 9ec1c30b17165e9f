//! HTTP wire contract for the hospital appointment service.
//!
//! This crate defines the request and response bodies exchanged between the
//! server and its clients, plus the error body shape and error codes. Both
//! sides depend on it so the contract cannot drift.

mod error;
mod requests;
mod responses;

pub use error::*;
pub use requests::*;
pub use responses::*;
