//! Unit tests for the in-memory OTP store

use std::sync::Arc;

use crate::repositories::otp::{InMemoryOtpStore, OtpStore};

#[tokio::test]
async fn test_store_and_get_record() {
    let store = InMemoryOtpStore::new();

    store.store("+15550001111", "hash-a", 5).await.unwrap();

    let record = store.get_record("+15550001111").await.unwrap().unwrap();
    assert_eq!(record.identifier, "+15550001111");
    assert_eq!(record.code_hash, "hash-a");
    assert_eq!(record.attempts, 1);
    assert!(!record.is_expired());
}

#[tokio::test]
async fn test_get_record_absent() {
    let store = InMemoryOtpStore::new();
    assert!(store.get_record("+15550001111").await.unwrap().is_none());
}

#[tokio::test]
async fn test_store_is_upsert_and_resets_attempts() {
    let store = InMemoryOtpStore::new();

    store.store("+15550001111", "hash-a", 5).await.unwrap();
    store.increment_attempts("+15550001111").await.unwrap();
    store.increment_attempts("+15550001111").await.unwrap();
    assert_eq!(store.get_attempts("+15550001111").await.unwrap(), 3);

    // Regeneration replaces the record and resets the counter
    store.store("+15550001111", "hash-b", 5).await.unwrap();

    let record = store.get_record("+15550001111").await.unwrap().unwrap();
    assert_eq!(record.code_hash, "hash-b");
    assert_eq!(record.attempts, 1);
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let store = InMemoryOtpStore::new();

    store.store("+15550001111", "hash-a", 5).await.unwrap();
    store.delete("+15550001111").await.unwrap();
    assert!(store.get_record("+15550001111").await.unwrap().is_none());

    // Deleting again must not error
    store.delete("+15550001111").await.unwrap();
}

#[tokio::test]
async fn test_increment_attempts_returns_new_count() {
    let store = InMemoryOtpStore::new();

    store.store("+15550001111", "hash-a", 5).await.unwrap();
    assert_eq!(store.increment_attempts("+15550001111").await.unwrap(), 2);
    assert_eq!(store.increment_attempts("+15550001111").await.unwrap(), 3);
}

#[tokio::test]
async fn test_increment_attempts_absent_record() {
    let store = InMemoryOtpStore::new();

    // No record is created by incrementing an absent identifier
    assert_eq!(store.increment_attempts("+15550001111").await.unwrap(), 1);
    assert!(store.get_record("+15550001111").await.unwrap().is_none());
}

#[tokio::test]
async fn test_get_attempts_sentinel_when_absent() {
    let store = InMemoryOtpStore::new();
    assert_eq!(store.get_attempts("+15550001111").await.unwrap(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_increments_do_not_undercount() {
    let store = Arc::new(InMemoryOtpStore::new());
    store.store("+15550001111", "hash-a", 5).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..20 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store.increment_attempts("+15550001111").await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(store.get_attempts("+15550001111").await.unwrap(), 21);
}
