//! Repository contracts and backends for OTP persistence.

pub mod otp;

pub use otp::{InMemoryOtpStore, OtpStore};
