//! Mock stores for OTP service tests

use async_trait::async_trait;

use crate::domain::entities::OtpRecord;
use crate::errors::OtpError;
use crate::repositories::otp::OtpStore;

/// Store whose every operation fails, for exercising backend-outage paths
pub struct FailingOtpStore;

impl FailingOtpStore {
    fn unavailable() -> OtpError {
        OtpError::Storage {
            message: "backend unavailable".to_string(),
        }
    }
}

#[async_trait]
impl OtpStore for FailingOtpStore {
    async fn store(
        &self,
        _identifier: &str,
        _code_hash: &str,
        _expiry_minutes: i64,
    ) -> Result<(), OtpError> {
        Err(Self::unavailable())
    }

    async fn get_record(&self, _identifier: &str) -> Result<Option<OtpRecord>, OtpError> {
        Err(Self::unavailable())
    }

    async fn delete(&self, _identifier: &str) -> Result<(), OtpError> {
        Err(Self::unavailable())
    }

    async fn increment_attempts(&self, _identifier: &str) -> Result<u32, OtpError> {
        Err(Self::unavailable())
    }

    async fn get_attempts(&self, _identifier: &str) -> Result<u32, OtpError> {
        Err(Self::unavailable())
    }
}
