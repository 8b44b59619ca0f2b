//! # OtpKit Core
//!
//! OTP lifecycle logic for the OtpKit library. This crate contains the
//! hashed-record entity, the storage contract with an in-memory backend,
//! the manager that enforces expiry and attempt-limit policy, and the
//! error types shared across backends.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
