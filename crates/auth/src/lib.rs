//! Password hashing for the hospital appointment service.
//!
//! This crate provides:
//! - Salted one-way password hashing (bcrypt)
//! - Constant verification against stored hashes
//!
//! No tokens or sessions; authentication is a credential check only.

mod error;
mod password;

pub use error::*;
pub use password::*;

/// Fixed bcrypt cost factor used for all password hashes.
pub const HASH_COST: u32 = 10;
