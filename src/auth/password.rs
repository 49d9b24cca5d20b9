use sha2::{Digest, Sha256};

/// Hex SHA-256 of `salt || password`.
///
/// A single round of a fast digest with a process-wide salt. Stored hashes are
/// matched by equality, so changing the salt invalidates every account.
pub fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}
