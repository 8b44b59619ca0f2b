//! MySQL implementations of the OTP storage contract.

pub mod otp_store;

pub use otp_store::MySqlOtpStore;
