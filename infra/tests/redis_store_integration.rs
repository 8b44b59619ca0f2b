//! Integration tests for the Redis-backed OTP store
//!
//! These tests require a running Redis instance to execute.
//! Run with: cargo test -p otp_infra --test redis_store_integration -- --ignored

use std::sync::Arc;

use otp_core::repositories::otp::OtpStore;
use otp_core::services::otp::{OtpConfig, OtpManager, VerificationResult};
use otp_infra::cache::{CacheConfig, RedisClient, RedisOtpStore};

async fn test_store() -> RedisOtpStore {
    let config = CacheConfig {
        url: std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
        ..Default::default()
    }
    .with_prefix("otpkit:test");

    let client = RedisClient::new(config)
        .await
        .expect("Failed to connect to Redis");
    RedisOtpStore::new(client)
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_connection() {
    let config = CacheConfig {
        url: std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
        ..Default::default()
    };

    let client = RedisClient::new(config)
        .await
        .expect("Failed to connect to Redis");
    client.ping().await.expect("PING failed");
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_store_and_get_roundtrip() {
    let store = test_store().await;

    store
        .store("redis-roundtrip@example.com", "hash-a", 5)
        .await
        .unwrap();

    let record = store
        .get_record("redis-roundtrip@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.identifier, "redis-roundtrip@example.com");
    assert_eq!(record.code_hash, "hash-a");
    assert_eq!(record.attempts, 1);
    assert!(!record.is_expired());

    store.delete("redis-roundtrip@example.com").await.unwrap();
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_upsert_resets_attempts() {
    let store = test_store().await;

    store.store("redis-upsert@example.com", "hash-a", 5).await.unwrap();
    assert_eq!(
        store.increment_attempts("redis-upsert@example.com").await.unwrap(),
        2
    );
    assert_eq!(
        store.increment_attempts("redis-upsert@example.com").await.unwrap(),
        3
    );

    store.store("redis-upsert@example.com", "hash-b", 5).await.unwrap();

    let record = store
        .get_record("redis-upsert@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.code_hash, "hash-b");
    assert_eq!(record.attempts, 1);

    store.delete("redis-upsert@example.com").await.unwrap();
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_increment_absent_identifier_creates_nothing() {
    let store = test_store().await;

    assert_eq!(
        store.increment_attempts("redis-absent@example.com").await.unwrap(),
        1
    );
    assert!(store
        .get_record("redis-absent@example.com")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_delete_is_idempotent() {
    let store = test_store().await;

    store.store("redis-delete@example.com", "hash-a", 5).await.unwrap();
    store.delete("redis-delete@example.com").await.unwrap();
    store.delete("redis-delete@example.com").await.unwrap();

    assert!(store
        .get_record("redis-delete@example.com")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_manager_lifecycle_over_redis() {
    let store = Arc::new(test_store().await);
    let manager = OtpManager::new(Arc::clone(&store), OtpConfig::default());

    let issued = manager.generate("redis-manager@example.com").await.unwrap();

    let result = manager
        .validate("redis-manager@example.com", &issued.code)
        .await
        .unwrap();
    assert_eq!(result, VerificationResult::Success);

    let result = manager
        .validate("redis-manager@example.com", &issued.code)
        .await
        .unwrap();
    assert_eq!(result, VerificationResult::NotFound);
}
