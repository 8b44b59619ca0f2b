//! Hashed one-time passcode record bound to an identifier.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Default number of characters in a generated code
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Default validity window for a code (5 minutes)
pub const DEFAULT_EXPIRY_MINUTES: i64 = 5;

/// Default maximum number of validation attempts
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Hashed OTP record for a single identifier
///
/// At most one record exists per identifier at any time: storing a new code
/// replaces the previous record and resets the attempt counter to 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRecord {
    /// Identifier the code is bound to (phone number, email, account id)
    pub identifier: String,

    /// Hex-encoded digest of the plaintext code; the plaintext is never stored
    pub code_hash: String,

    /// Attempt counter; starts at 1 when the record is created
    pub attempts: u32,

    /// Timestamp when the record was created
    pub created_at: DateTime<Utc>,

    /// Timestamp after which the record is no longer valid
    pub expires_at: DateTime<Utc>,
}

impl OtpRecord {
    /// Creates a record for `identifier` expiring `expiry_minutes` from now
    ///
    /// # Arguments
    ///
    /// * `identifier` - The subject the code is bound to
    /// * `code_hash` - Digest of the plaintext code
    /// * `expiry_minutes` - Number of minutes until the record expires
    pub fn new(
        identifier: impl Into<String>,
        code_hash: impl Into<String>,
        expiry_minutes: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            identifier: identifier.into(),
            code_hash: code_hash.into(),
            attempts: 1,
            created_at: now,
            expires_at: now + Duration::minutes(expiry_minutes),
        }
    }

    /// Checks if the record has passed its expiry deadline
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Checks if the attempt counter has exhausted `max_attempts`
    ///
    /// The stored counter includes the slot consumed by generation, so the
    /// record is exhausted once `attempts` strictly exceeds the limit.
    pub fn is_exhausted(&self, max_attempts: u32) -> bool {
        self.attempts > max_attempts
    }

    /// Number of failed guesses still allowed under `max_attempts`
    pub fn remaining_attempts(&self, max_attempts: u32) -> u32 {
        (max_attempts + 1).saturating_sub(self.attempts)
    }
}
