//! Storage for the hospital appointment service.
//!
//! This crate provides a storage abstraction for users and appointments. It
//! supports SQLite (embedded single-file database) and PostgreSQL
//! (client-server), plus an in-memory implementation for tests. All variants
//! enforce the same invariants: unique user emails, a foreign key from
//! appointments to users, and `"pending"` status on every new appointment.

mod error;
mod memory;
mod postgres;
mod sqlite;
mod traits;

pub use error::*;
pub use memory::*;
pub use postgres::*;
pub use sqlite::*;
pub use traits::*;
