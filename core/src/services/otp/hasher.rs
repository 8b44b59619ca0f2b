//! Digest computation for stored passcodes.
//!
//! Codes are persisted as SHA-256 digests salted with the identifier, so
//! the same plaintext yields different digests for different identifiers
//! while remaining deterministic across process restarts (no stored salt).

use constant_time_eq::constant_time_eq;
use sha2::{Digest, Sha256};

/// Compute the hex-encoded digest stored in place of a plaintext code
pub fn hash_code(identifier: &str, code: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(identifier.as_bytes());
    hasher.update(b":");
    hasher.update(code.as_bytes());
    hex::encode(hasher.finalize())
}

/// Compare a presented code against a stored digest in constant time
pub fn verify_code(identifier: &str, presented: &str, stored_hash: &str) -> bool {
    let presented_hash = hash_code(identifier, presented);
    constant_time_eq(presented_hash.as_bytes(), stored_hash.as_bytes())
}
