//! Tests for configuration validation

use shardcron::config::{
    BootstrapConfig, CacheBackendConfig, CoordinationBackendConfig, StoreBackendConfig,
};
use shardcron::core::DEFAULT_CRON;

fn valid() -> BootstrapConfig {
    BootstrapConfig {
        namespace: "acme.jobs".to_string(),
        default_cron: DEFAULT_CRON.to_string(),
        store: StoreBackendConfig::InMemory,
        coordination: CoordinationBackendConfig::InMemory,
        cache: CacheBackendConfig::InMemory,
    }
}

#[test]
fn test_config_validation() {
    assert!(valid().validate().is_ok());
}

#[test]
fn test_config_rejects_empty_namespace() {
    let mut cfg = valid();
    cfg.namespace = "  ".to_string();
    assert!(cfg.validate().is_err());
}

#[test]
fn test_config_rejects_bad_default_cron() {
    let mut cfg = valid();
    cfg.default_cron = "whenever".to_string();
    assert!(cfg.validate().is_err());
}

#[test]
fn test_config_from_json() {
    let cfg = BootstrapConfig::from_json_str(
        r#"{
            "namespace": "acme.jobs",
            "default_cron": "0 0/5 * * * ?",
            "store": "postgres",
            "coordination": "zookeeper",
            "cache": "redis"
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.namespace, "acme.jobs");
    assert_eq!(cfg.default_cron, "0 0/5 * * * ?");
    assert!(matches!(cfg.store, StoreBackendConfig::Postgres));
    assert!(matches!(cfg.coordination, CoordinationBackendConfig::Zookeeper));
    assert!(matches!(cfg.cache, CacheBackendConfig::Redis));
}

#[test]
fn test_config_from_json_default_cron_applies() {
    let cfg = BootstrapConfig::from_json_str(
        r#"{
            "namespace": "acme.jobs",
            "store": "in_memory",
            "coordination": "in_memory",
            "cache": "in_memory"
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.default_cron, DEFAULT_CRON);
}

#[test]
fn test_config_from_json_rejects_garbage() {
    assert!(BootstrapConfig::from_json_str("not json").is_err());
}

#[test]
fn test_config_from_json_validates() {
    let result = BootstrapConfig::from_json_str(
        r#"{
            "namespace": "",
            "store": "in_memory",
            "coordination": "in_memory",
            "cache": "in_memory"
        }"#,
    );
    assert!(result.is_err());
}
