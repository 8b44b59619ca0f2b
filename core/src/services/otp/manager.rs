//! OTP manager enforcing expiry and attempt-limit policy.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use otp_shared::utils::mask_identifier;

use crate::errors::OtpError;
use crate::repositories::otp::OtpStore;

use super::config::OtpConfig;
use super::generator::generate_code;
use super::hasher::{hash_code, verify_code};
use super::types::{IssuedOtp, VerificationResult};

/// OTP manager
///
/// Orchestrates generate → hash → store and validate → compare →
/// increment/delete against an [`OtpStore`] backend. Policy (code format,
/// expiry window, attempt limit) lives here; persistence details live in
/// the store. The manager is constructed explicitly with its store — there
/// is no global accessor.
pub struct OtpManager<S: OtpStore> {
    /// Storage backend for hashed records
    store: Arc<S>,
    /// Policy configuration
    config: OtpConfig,
}

impl<S: OtpStore> OtpManager<S> {
    /// Create a manager with the given store and configuration
    pub fn new(store: Arc<S>, config: OtpConfig) -> Self {
        Self { store, config }
    }

    /// The manager's policy configuration
    pub fn config(&self) -> &OtpConfig {
        &self.config
    }

    /// Issue a new code for `identifier` using the configured policy
    ///
    /// Replaces any previously issued code for the identifier and resets
    /// its attempt counter to 1. Returns the plaintext exactly once, for
    /// delivery over an external channel; only its digest is stored and
    /// the plaintext is never logged.
    ///
    /// # Errors
    /// * `OtpError::InvalidInput` - empty identifier or zero code length
    /// * `OtpError::Storage` - the backend write failed
    pub async fn generate(&self, identifier: &str) -> Result<IssuedOtp, OtpError> {
        self.generate_with(identifier, &self.config).await
    }

    /// Issue a new code with per-call options
    pub async fn generate_with(
        &self,
        identifier: &str,
        options: &OtpConfig,
    ) -> Result<IssuedOtp, OtpError> {
        if identifier.trim().is_empty() {
            return Err(OtpError::InvalidInput {
                message: "identifier must not be empty".to_string(),
            });
        }
        if options.code_length == 0 {
            return Err(OtpError::InvalidInput {
                message: "code length must be at least 1".to_string(),
            });
        }

        let code = generate_code(options.code_length, options.charset);
        let digest = hash_code(identifier, &code);
        let expires_at = Utc::now() + chrono::Duration::minutes(options.expiry_minutes);

        self.store
            .store(identifier, &digest, options.expiry_minutes)
            .await?;

        info!(
            identifier = %mask_identifier(identifier),
            event = "otp_generated",
            code_length = options.code_length,
            expiry_minutes = options.expiry_minutes,
            "Issued new one-time passcode"
        );

        Ok(IssuedOtp { code, expires_at })
    }

    /// Validate a presented code for `identifier` under the configured policy
    ///
    /// Performs exactly one store mutation per call: deletion on success,
    /// expiry, or exhaustion; an attempt increment on mismatch; none when
    /// no record exists.
    ///
    /// # Errors
    /// * `OtpError::Storage` - the backend read or write failed
    pub async fn validate(
        &self,
        identifier: &str,
        presented: &str,
    ) -> Result<VerificationResult, OtpError> {
        self.validate_with(identifier, presented, &self.config).await
    }

    /// Validate a presented code with per-call options
    pub async fn validate_with(
        &self,
        identifier: &str,
        presented: &str,
        options: &OtpConfig,
    ) -> Result<VerificationResult, OtpError> {
        let record = match self.store.get_record(identifier).await? {
            Some(record) => record,
            None => {
                info!(
                    identifier = %mask_identifier(identifier),
                    event = "otp_not_found",
                    "No passcode record for identifier"
                );
                return Ok(VerificationResult::NotFound);
            }
        };

        if record.is_expired() {
            self.store.delete(identifier).await?;
            info!(
                identifier = %mask_identifier(identifier),
                event = "otp_expired",
                "Passcode expired; record removed"
            );
            return Ok(VerificationResult::Expired);
        }

        if record.is_exhausted(options.max_attempts) {
            // Force re-issuance instead of leaving a guessable record behind
            self.store.delete(identifier).await?;
            warn!(
                identifier = %mask_identifier(identifier),
                attempts = record.attempts,
                max_attempts = options.max_attempts,
                event = "otp_attempts_exceeded",
                "Attempt limit exhausted; record removed"
            );
            return Ok(VerificationResult::AttemptsExceeded);
        }

        if verify_code(identifier, presented, &record.code_hash) {
            self.store.delete(identifier).await?;
            info!(
                identifier = %mask_identifier(identifier),
                event = "otp_verified",
                "Passcode verified; record consumed"
            );
            return Ok(VerificationResult::Success);
        }

        let attempts = self.store.increment_attempts(identifier).await?;
        let remaining_attempts = (options.max_attempts + 1).saturating_sub(attempts);
        warn!(
            identifier = %mask_identifier(identifier),
            attempts = attempts,
            remaining_attempts = remaining_attempts,
            event = "otp_mismatch",
            "Passcode mismatch"
        );
        Ok(VerificationResult::Mismatch { remaining_attempts })
    }

    /// Failed guesses still allowed for `identifier`, or `None` when no
    /// record exists
    ///
    /// Reads the full record rather than the store's attempt counter, so
    /// an absent record is not mistaken for a fresh one.
    pub async fn remaining_attempts(&self, identifier: &str) -> Result<Option<u32>, OtpError> {
        let record = self.store.get_record(identifier).await?;
        Ok(record.map(|r| r.remaining_attempts(self.config.max_attempts)))
    }
}
