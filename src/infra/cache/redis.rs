//! Redis-backed snapshot cache (interface stubs).

use async_trait::async_trait;

use crate::core::BootstrapError;
use crate::infra::cache::SnapshotCache;

/// Redis snapshot-cache adapter placeholder.
pub struct RedisSnapshotCache;

#[async_trait]
impl SnapshotCache for RedisSnapshotCache {
    async fn set(&self, _key: &str, _value: serde_json::Value) -> Result<(), BootstrapError> {
        Err(BootstrapError::Cache(
            "redis cache not wired to a client".into(),
        ))
    }

    async fn get(&self, _key: &str) -> Result<Option<serde_json::Value>, BootstrapError> {
        Err(BootstrapError::Cache(
            "redis cache not wired to a client".into(),
        ))
    }
}
