//! In-memory OTP store backed by a read-write lock.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::OtpRecord;
use crate::errors::OtpError;

use super::r#trait::OtpStore;

/// In-memory OTP store
///
/// Suitable for single-process deployments and tests. The write lock
/// serializes mutations per identifier, so `increment_attempts` cannot
/// under-count under concurrent validation attempts.
#[derive(Clone)]
pub struct InMemoryOtpStore {
    records: Arc<RwLock<HashMap<String, OtpRecord>>>,
}

impl InMemoryOtpStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryOtpStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OtpStore for InMemoryOtpStore {
    async fn store(
        &self,
        identifier: &str,
        code_hash: &str,
        expiry_minutes: i64,
    ) -> Result<(), OtpError> {
        let mut records = self.records.write().await;
        records.insert(
            identifier.to_string(),
            OtpRecord::new(identifier, code_hash, expiry_minutes),
        );
        Ok(())
    }

    async fn get_record(&self, identifier: &str) -> Result<Option<OtpRecord>, OtpError> {
        let records = self.records.read().await;
        Ok(records.get(identifier).cloned())
    }

    async fn delete(&self, identifier: &str) -> Result<(), OtpError> {
        let mut records = self.records.write().await;
        records.remove(identifier);
        Ok(())
    }

    async fn increment_attempts(&self, identifier: &str) -> Result<u32, OtpError> {
        let mut records = self.records.write().await;
        match records.get_mut(identifier) {
            Some(record) => {
                record.attempts += 1;
                Ok(record.attempts)
            }
            None => Ok(1),
        }
    }

    async fn get_attempts(&self, identifier: &str) -> Result<u32, OtpError> {
        let records = self.records.read().await;
        Ok(records.get(identifier).map(|r| r.attempts).unwrap_or(1))
    }
}
