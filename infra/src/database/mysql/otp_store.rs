//! MySQL-backed OTP store
//!
//! One row per identifier in the `otp_codes` table:
//!
//! ```sql
//! CREATE TABLE otp_codes (
//!     identifier VARCHAR(255) NOT NULL PRIMARY KEY,
//!     otp_hash   VARCHAR(64)  NOT NULL,
//!     attempts   INT UNSIGNED NOT NULL DEFAULT 1,
//!     created_at DATETIME(6)  NOT NULL,
//!     expires_at DATETIME(6)  NOT NULL
//! );
//! ```
//!
//! The upsert runs as `INSERT ... ON DUPLICATE KEY UPDATE` and the attempt
//! increment as a single row-level `UPDATE`, so both are atomic under
//! concurrent validation attempts for the same identifier.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use sqlx::{MySql, Pool, Row};
use tracing::{debug, error, info};

use otp_core::domain::entities::OtpRecord;
use otp_core::errors::OtpError;
use otp_core::repositories::otp::OtpStore;
use otp_shared::utils::mask_identifier;

/// MySQL-backed OTP store
pub struct MySqlOtpStore {
    /// Database connection pool
    pool: Pool<MySql>,
}

impl MySqlOtpStore {
    /// Create a store on top of an existing connection pool
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }

    fn storage_error(context: &str, err: sqlx::Error) -> OtpError {
        OtpError::Storage {
            message: format!("{}: {}", context, err),
        }
    }

    /// Delete expired rows (maintenance task for an external retention job)
    pub async fn cleanup_expired(&self) -> Result<u64, OtpError> {
        let result = sqlx::query("DELETE FROM otp_codes WHERE expires_at <= NOW(6)")
            .execute(&self.pool)
            .await
            .map_err(|e| Self::storage_error("failed to clean up expired OTP records", e))?;

        let deleted = result.rows_affected();
        if deleted > 0 {
            info!(deleted = deleted, "Cleaned up expired OTP records");
        }
        Ok(deleted)
    }
}

#[async_trait]
impl OtpStore for MySqlOtpStore {
    async fn store(
        &self,
        identifier: &str,
        code_hash: &str,
        expiry_minutes: i64,
    ) -> Result<(), OtpError> {
        let now = Utc::now();
        let expires_at = now + Duration::minutes(expiry_minutes);

        let query = r#"
            INSERT INTO otp_codes (identifier, otp_hash, attempts, created_at, expires_at)
            VALUES (?, ?, 1, ?, ?)
            ON DUPLICATE KEY UPDATE
                otp_hash = VALUES(otp_hash),
                attempts = 1,
                created_at = VALUES(created_at),
                expires_at = VALUES(expires_at)
        "#;

        sqlx::query(query)
            .bind(identifier)
            .bind(code_hash)
            .bind(now)
            .bind(expires_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(
                    identifier = %mask_identifier(identifier),
                    error = %e,
                    "Failed to store OTP record"
                );
                Self::storage_error("failed to store OTP record", e)
            })?;

        debug!(
            identifier = %mask_identifier(identifier),
            "Stored OTP record in database"
        );
        Ok(())
    }

    async fn get_record(&self, identifier: &str) -> Result<Option<OtpRecord>, OtpError> {
        let query = r#"
            SELECT otp_hash, attempts, created_at, expires_at
            FROM otp_codes
            WHERE identifier = ?
        "#;

        let row = sqlx::query(query)
            .bind(identifier)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::storage_error("failed to read OTP record", e))?;

        match row {
            Some(row) => {
                let record = OtpRecord {
                    identifier: identifier.to_string(),
                    code_hash: row
                        .try_get("otp_hash")
                        .map_err(|e| Self::storage_error("failed to decode otp_hash", e))?,
                    attempts: row
                        .try_get("attempts")
                        .map_err(|e| Self::storage_error("failed to decode attempts", e))?,
                    created_at: row
                        .try_get("created_at")
                        .map_err(|e| Self::storage_error("failed to decode created_at", e))?,
                    expires_at: row
                        .try_get("expires_at")
                        .map_err(|e| Self::storage_error("failed to decode expires_at", e))?,
                };
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, identifier: &str) -> Result<(), OtpError> {
        // Deleting an absent row affects zero rows and is not an error
        sqlx::query("DELETE FROM otp_codes WHERE identifier = ?")
            .bind(identifier)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(
                    identifier = %mask_identifier(identifier),
                    error = %e,
                    "Failed to delete OTP record"
                );
                Self::storage_error("failed to delete OTP record", e)
            })?;

        debug!(
            identifier = %mask_identifier(identifier),
            "Deleted OTP record from database"
        );
        Ok(())
    }

    async fn increment_attempts(&self, identifier: &str) -> Result<u32, OtpError> {
        sqlx::query("UPDATE otp_codes SET attempts = attempts + 1 WHERE identifier = ?")
            .bind(identifier)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::storage_error("failed to increment attempt count", e))?;

        let attempts = sqlx::query("SELECT attempts FROM otp_codes WHERE identifier = ?")
            .bind(identifier)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::storage_error("failed to read attempt count", e))?
            .and_then(|row| row.try_get::<u32, _>("attempts").ok())
            .unwrap_or(1);

        debug!(
            identifier = %mask_identifier(identifier),
            attempts = attempts,
            "Incremented OTP attempt count"
        );
        Ok(attempts)
    }

    async fn get_attempts(&self, identifier: &str) -> Result<u32, OtpError> {
        let attempts = sqlx::query("SELECT attempts FROM otp_codes WHERE identifier = ?")
            .bind(identifier)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::storage_error("failed to read attempt count", e))?
            .and_then(|row| row.try_get::<u32, _>("attempts").ok())
            .unwrap_or(1);

        Ok(attempts)
    }
}
