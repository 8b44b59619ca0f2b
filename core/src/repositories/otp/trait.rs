//! OTP store trait defining the storage contract for hashed passcode records.

use async_trait::async_trait;

use crate::domain::entities::OtpRecord;
use crate::errors::OtpError;

/// Storage contract for hashed OTP records, keyed by identifier
///
/// The manager is backend-agnostic: anything implementing the five
/// operations below is substitutable (relational table, in-memory map,
/// distributed cache). The contract makes no durability guarantee across
/// process restarts beyond what the chosen backend provides.
///
/// # Concurrency
///
/// Two validation attempts racing on the same identifier must not
/// under-count the attempt counter. Implementations therefore provide
/// `increment_attempts` as an atomic increment at the backend (never a
/// caller-side read-modify-write) and serialize `store`/`delete` for a
/// given identifier.
#[async_trait]
pub trait OtpStore: Send + Sync {
    /// Upsert the record for `identifier`
    ///
    /// Replaces any existing record, resets the attempt counter to 1, and
    /// sets the expiry deadline to `expiry_minutes` from now.
    ///
    /// # Arguments
    /// * `identifier` - The subject the code is bound to
    /// * `code_hash` - Digest of the plaintext code
    /// * `expiry_minutes` - Validity window in minutes
    ///
    /// # Returns
    /// * `Ok(())` - Record stored
    /// * `Err(OtpError::Storage)` - Backend write failed
    async fn store(
        &self,
        identifier: &str,
        code_hash: &str,
        expiry_minutes: i64,
    ) -> Result<(), OtpError>;

    /// Fetch the full record for `identifier`
    ///
    /// # Returns
    /// * `Ok(Some(OtpRecord))` - Record found
    /// * `Ok(None)` - No record for this identifier
    /// * `Err(OtpError::Storage)` - Backend read failed
    async fn get_record(&self, identifier: &str) -> Result<Option<OtpRecord>, OtpError>;

    /// Delete the record for `identifier`
    ///
    /// Idempotent: deleting an absent record is not an error.
    async fn delete(&self, identifier: &str) -> Result<(), OtpError>;

    /// Atomically increment the attempt counter by 1
    ///
    /// # Returns
    /// * `Ok(u32)` - The new attempt count, or 1 if no record exists
    /// * `Err(OtpError::Storage)` - Backend write failed
    async fn increment_attempts(&self, identifier: &str) -> Result<u32, OtpError>;

    /// Current attempt count for `identifier`, defaulting to 1 when absent
    ///
    /// The sentinel makes "absent" indistinguishable from "freshly stored";
    /// callers that care should use [`get_record`](Self::get_record).
    async fn get_attempts(&self, identifier: &str) -> Result<u32, OtpError>;
}
