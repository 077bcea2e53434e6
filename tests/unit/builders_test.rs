//! Tests for builder modules

use std::sync::Arc;

use shardcron::builders::build_bootstrap_defaults;
use shardcron::config::{
    BootstrapConfig, CacheBackendConfig, CoordinationBackendConfig, StoreBackendConfig,
};
use shardcron::core::{BootstrapError, JobRegistry, DEFAULT_CRON};
use shardcron::runtime::TokioSpawner;

fn in_memory_config() -> BootstrapConfig {
    BootstrapConfig {
        namespace: "acme.jobs".to_string(),
        default_cron: DEFAULT_CRON.to_string(),
        store: StoreBackendConfig::InMemory,
        coordination: CoordinationBackendConfig::InMemory,
        cache: CacheBackendConfig::InMemory,
    }
}

#[tokio::test]
async fn test_build_defaults_in_memory() {
    let cfg = in_memory_config();
    let reconciler = build_bootstrap_defaults(
        &cfg,
        Arc::new(JobRegistry::new()),
        TokioSpawner::new(tokio::runtime::Handle::current()),
    )
    .unwrap();
    assert!(reconciler.run_state().is_empty());
}

#[tokio::test]
async fn test_build_rejects_invalid_config() {
    let mut cfg = in_memory_config();
    cfg.namespace = String::new();
    let err = build_bootstrap_defaults(
        &cfg,
        Arc::new(JobRegistry::new()),
        TokioSpawner::new(tokio::runtime::Handle::current()),
    )
    .unwrap_err();
    assert!(matches!(err, BootstrapError::Config(_)));
}

#[tokio::test]
async fn test_built_reconciler_bootstraps_empty_registry() {
    let cfg = in_memory_config();
    let reconciler = build_bootstrap_defaults(
        &cfg,
        Arc::new(JobRegistry::new()),
        TokioSpawner::new(tokio::runtime::Handle::current()),
    )
    .unwrap();
    let summary = reconciler.bootstrap().await;
    assert_eq!(summary.live, 0);
    assert!(!summary.aborted);
}
