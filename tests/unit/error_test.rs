//! Tests for error types

use shardcron::core::BootstrapError;

#[test]
fn test_store_error() {
    let err = BootstrapError::Store("connection refused".to_string());
    assert_eq!(format!("{err}"), "store error: connection refused");
}

#[test]
fn test_duplicate_key_error() {
    let err = BootstrapError::DuplicateKey("orderSyncJob".to_string());
    assert_eq!(format!("{err}"), "duplicate job key: orderSyncJob");
}

#[test]
fn test_coordination_error() {
    let err = BootstrapError::Coordination("session expired".to_string());
    assert_eq!(format!("{err}"), "coordination error: session expired");
}

#[test]
fn test_cache_error() {
    let err = BootstrapError::Cache("write timeout".to_string());
    assert_eq!(format!("{err}"), "cache error: write timeout");
}

#[test]
fn test_key_collision_error() {
    let err = BootstrapError::KeyCollision("orderSyncJob".to_string());
    assert_eq!(format!("{err}"), "job key registered twice: orderSyncJob");
}

#[test]
fn test_executor_missing_error() {
    let err = BootstrapError::ExecutorMissing("ghostJob".to_string());
    assert_eq!(format!("{err}"), "no executor bound for job key: ghostJob");
}

#[test]
fn test_invalid_cron_error() {
    let err = BootstrapError::InvalidCron {
        expr: "bogus".to_string(),
        reason: "expected six fields".to_string(),
    };
    assert_eq!(
        format!("{err}"),
        "invalid cron expression `bogus`: expected six fields"
    );
}

#[test]
fn test_invalid_state_error() {
    let err = BootstrapError::InvalidState("init called twice".to_string());
    assert_eq!(format!("{err}"), "scheduler in invalid state: init called twice");
}

#[test]
fn test_config_error() {
    let err = BootstrapError::Config("namespace must not be empty".to_string());
    assert_eq!(format!("{err}"), "config invalid: namespace must not be empty");
}
