//! # OtpKit Infrastructure
//!
//! Concrete OTP store backends and connection plumbing: a Redis store with
//! native TTL expiry and a MySQL store with row-level atomic updates. Both
//! implement the `otp_core` storage contract and are substitutable behind
//! the manager.

// Re-export core error types for convenience
pub use otp_core::errors::*;

/// Cache module - Redis client and the Redis-backed store
pub mod cache;

/// Database module - MySQL pool and the MySQL-backed store
pub mod database;

pub mod config {
    //! Configuration for infrastructure backends

    use otp_shared::config::{CacheConfig, DatabaseConfig};
    use serde::{Deserialize, Serialize};

    /// Infrastructure configuration settings
    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    pub struct OtpInfraConfig {
        /// Database configuration
        pub database: DatabaseConfig,
        /// Redis cache configuration
        pub cache: CacheConfig,
    }

    /// Load configuration from the environment (and `.env` if present)
    pub fn load_config() -> OtpInfraConfig {
        dotenvy::dotenv().ok();

        OtpInfraConfig {
            database: DatabaseConfig::from_env(),
            cache: CacheConfig::from_env(),
        }
    }
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfraError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
