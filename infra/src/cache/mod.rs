//! Cache module for Redis-backed OTP storage.

pub mod redis_client;
pub mod redis_store;

pub use redis_client::RedisClient;
pub use redis_store::RedisOtpStore;

// Re-export commonly used types
pub use otp_shared::config::CacheConfig;
