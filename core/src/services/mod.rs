//! Business services enforcing OTP policy.

pub mod otp;

pub use otp::*;
