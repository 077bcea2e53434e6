//! Bootstrap configuration structures.

use serde::{Deserialize, Serialize};

use crate::core::job::DEFAULT_CRON;
use crate::core::parse_cron;

/// Config-store backend selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackendConfig {
    /// In-memory store for development/testing.
    InMemory,
    /// Postgres-backed store.
    Postgres,
}

/// Coordination-tree backend selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinationBackendConfig {
    /// In-memory tree for development/testing.
    InMemory,
    /// ZooKeeper-backed tree.
    Zookeeper,
}

/// Snapshot-cache backend selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheBackendConfig {
    /// In-memory cache for development/testing.
    InMemory,
    /// Redis-backed cache.
    Redis,
}

/// Root bootstrap configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Deployment namespace; prefix of every coordination node name.
    pub namespace: String,
    /// Cron expression applied to jobs that declare none.
    #[serde(default = "default_cron")]
    pub default_cron: String,
    /// Config-store backend.
    pub store: StoreBackendConfig,
    /// Coordination-tree backend.
    pub coordination: CoordinationBackendConfig,
    /// Snapshot-cache backend.
    pub cache: CacheBackendConfig,
}

fn default_cron() -> String {
    DEFAULT_CRON.to_owned()
}

impl BootstrapConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.namespace.trim().is_empty() {
            return Err("namespace must not be empty".into());
        }
        parse_cron(&self.default_cron).map_err(|e| format!("default_cron invalid: {e}"))?;
        Ok(())
    }

    /// Parse bootstrap configuration from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }
}
