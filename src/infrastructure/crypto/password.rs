//! Password hashing utilities

use bcrypt::{hash_with_result, verify, BcryptError, Version};

/// Stored form of a password: the full bcrypt string plus its salt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordDigest {
    pub hash: String,
    pub salt: String,
}

/// Hash a password using bcrypt at the given cost
pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<PasswordDigest, BcryptError> {
    let parts = hash_with_result(password, cost)?;
    Ok(PasswordDigest {
        salt: parts.get_salt(),
        hash: parts.format_for_version(Version::TwoB),
    })
}

/// Verify a password against a hash. An empty hash never verifies.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, BcryptError> {
    if hash.is_empty() {
        return Ok(false);
    }
    verify(password, hash)
}
