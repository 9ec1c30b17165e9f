//! Password hashing and verification.

use crate::{AuthResult, HASH_COST};

/// Hashes a password with a per-hash random salt at the fixed cost.
pub fn hash_password(password: &str) -> AuthResult<String> {
    Ok(bcrypt::hash(password, HASH_COST)?)
}

/// Verifies a password against a stored hash.
///
/// Returns `Ok(false)` for a wrong password; errors only when the stored
/// hash itself is malformed.
pub fn verify_password(password: &str, hash: &str) -> AuthResult<bool> {
    Ok(bcrypt::verify(password, hash)?)
}
