//! Result types for the OTP service

use chrono::{DateTime, Utc};

/// Outcome of issuing a new code
#[derive(Debug, Clone)]
pub struct IssuedOtp {
    /// Plaintext code, returned once for delivery over an external channel
    pub code: String,
    /// Deadline after which the code stops validating
    pub expires_at: DateTime<Utc>,
}

/// Outcome of validating a presented code
///
/// These are expected business results, not failures: the manager returns
/// them inside `Ok(..)` so callers branch without error handling. What to
/// reveal externally is the presentation layer's decision; telemetry
/// distinguishes the variants internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationResult {
    /// Code matched; the record was deleted (one-time use)
    Success,
    /// Code did not match; the attempt counter was incremented
    Mismatch {
        /// Failed guesses still allowed before exhaustion
        remaining_attempts: u32,
    },
    /// The expiry deadline had passed; the record was removed
    Expired,
    /// No record exists for the identifier
    NotFound,
    /// The attempt limit was exhausted; the record was removed
    AttemptsExceeded,
}

impl VerificationResult {
    /// True only for a successful match
    pub fn is_success(&self) -> bool {
        matches!(self, VerificationResult::Success)
    }
}
