//! Error types for the OTP core.
//!
//! Only genuine failures are errors. Expected business outcomes of a
//! validation call (mismatch, expiry, missing record, exhausted attempts)
//! are reported as [`VerificationResult`](crate::services::otp::VerificationResult)
//! values so callers can branch on them without error handling.

use thiserror::Error;

/// Errors surfaced by the OTP manager and the storage contract
#[derive(Error, Debug)]
pub enum OtpError {
    /// Malformed caller arguments; fail fast, not retried
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Backend I/O failure; propagated as-is, the caller decides retry policy
    #[error("Storage error: {message}")]
    Storage { message: String },
}

pub type OtpResult<T> = Result<T, OtpError>;
