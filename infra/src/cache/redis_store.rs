//! Redis-backed OTP store
//!
//! One Redis hash per identifier (fields `code_hash`, `attempts`,
//! `created_at`, `expires_at`), written atomically under MULTI/EXEC with a
//! TTL matching the expiry window. `HINCRBY` provides the atomic attempt
//! increment, guarded by a small Lua script so failed guesses on absent
//! identifiers do not materialize phantom keys. The TTL doubles as
//! retention cleanup for expired records.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use redis::AsyncCommands;
use std::collections::HashMap;
use tracing::debug;

use otp_core::domain::entities::OtpRecord;
use otp_core::errors::OtpError;
use otp_core::repositories::otp::OtpStore;
use otp_shared::utils::mask_identifier;

use super::redis_client::RedisClient;

/// Redis key prefix for OTP records
const OTP_KEY_PREFIX: &str = "otp:code";

/// Increment `attempts` only when the record exists
const INCREMENT_IF_PRESENT: &str = r#"
if redis.call('EXISTS', KEYS[1]) == 1 then
    return redis.call('HINCRBY', KEYS[1], 'attempts', 1)
else
    return 0
end
"#;

/// Redis-backed OTP store
pub struct RedisOtpStore {
    /// Redis client for cache operations
    client: RedisClient,
}

impl RedisOtpStore {
    /// Create a store on top of an existing Redis client
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    /// Format the Redis key for an identifier
    fn format_key(&self, identifier: &str) -> String {
        self.client
            .config()
            .make_key(&format!("{}:{}", OTP_KEY_PREFIX, identifier))
    }

    fn storage_error(context: &str, err: redis::RedisError) -> OtpError {
        OtpError::Storage {
            message: format!("{}: {}", context, err),
        }
    }

    fn parse_timestamp(fields: &HashMap<String, String>, field: &str) -> Result<DateTime<Utc>, OtpError> {
        let raw = fields.get(field).ok_or_else(|| OtpError::Storage {
            message: format!("OTP record is missing the {} field", field),
        })?;
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| OtpError::Storage {
                message: format!("invalid {} timestamp: {}", field, e),
            })
    }

    fn parse_record(
        identifier: &str,
        fields: HashMap<String, String>,
    ) -> Result<Option<OtpRecord>, OtpError> {
        let code_hash = match fields.get("code_hash") {
            Some(hash) => hash.clone(),
            None => return Ok(None),
        };
        let attempts = fields
            .get("attempts")
            .and_then(|a| a.parse().ok())
            .unwrap_or(1);

        Ok(Some(OtpRecord {
            identifier: identifier.to_string(),
            code_hash,
            attempts,
            created_at: Self::parse_timestamp(&fields, "created_at")?,
            expires_at: Self::parse_timestamp(&fields, "expires_at")?,
        }))
    }
}

#[async_trait]
impl OtpStore for RedisOtpStore {
    async fn store(
        &self,
        identifier: &str,
        code_hash: &str,
        expiry_minutes: i64,
    ) -> Result<(), OtpError> {
        let key = self.format_key(identifier);
        let record = OtpRecord::new(identifier, code_hash, expiry_minutes);
        // At least one second of TTL so a zero-minute window still lands
        let ttl_seconds = (expiry_minutes * 60).max(1);

        let mut conn = self.client.connection();
        // DEL inside the transaction clears any prior record for the
        // identifier, making the write a true replacement
        redis::pipe()
            .atomic()
            .del(&key)
            .hset(&key, "code_hash", &record.code_hash)
            .hset(&key, "attempts", record.attempts)
            .hset(&key, "created_at", record.created_at.to_rfc3339())
            .hset(&key, "expires_at", record.expires_at.to_rfc3339())
            .cmd("EXPIRE")
            .arg(&key)
            .arg(ttl_seconds)
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(|e| Self::storage_error("failed to store OTP record", e))?;

        debug!(
            identifier = %mask_identifier(identifier),
            ttl_seconds = ttl_seconds,
            "Stored OTP record in Redis"
        );
        Ok(())
    }

    async fn get_record(&self, identifier: &str) -> Result<Option<OtpRecord>, OtpError> {
        let key = self.format_key(identifier);
        let mut conn = self.client.connection();
        let fields: HashMap<String, String> = conn
            .hgetall(&key)
            .await
            .map_err(|e| Self::storage_error("failed to read OTP record", e))?;

        if fields.is_empty() {
            return Ok(None);
        }
        Self::parse_record(identifier, fields)
    }

    async fn delete(&self, identifier: &str) -> Result<(), OtpError> {
        let key = self.format_key(identifier);
        let mut conn = self.client.connection();
        // DEL on an absent key is a no-op, keeping deletion idempotent
        conn.del::<_, ()>(&key)
            .await
            .map_err(|e| Self::storage_error("failed to delete OTP record", e))?;

        debug!(
            identifier = %mask_identifier(identifier),
            "Deleted OTP record from Redis"
        );
        Ok(())
    }

    async fn increment_attempts(&self, identifier: &str) -> Result<u32, OtpError> {
        let key = self.format_key(identifier);
        let mut conn = self.client.connection();
        let attempts: i64 = redis::Script::new(INCREMENT_IF_PRESENT)
            .key(&key)
            .invoke_async(&mut conn)
            .await
            .map_err(|e| Self::storage_error("failed to increment attempt count", e))?;

        if attempts == 0 {
            // Absent record: report the contract's sentinel
            return Ok(1);
        }

        debug!(
            identifier = %mask_identifier(identifier),
            attempts = attempts,
            "Incremented OTP attempt count"
        );
        Ok(attempts as u32)
    }

    async fn get_attempts(&self, identifier: &str) -> Result<u32, OtpError> {
        let key = self.format_key(identifier);
        let mut conn = self.client.connection();
        let attempts: Option<u32> = conn
            .hget(&key, "attempts")
            .await
            .map_err(|e| Self::storage_error("failed to read attempt count", e))?;

        Ok(attempts.unwrap_or(1))
    }
}
