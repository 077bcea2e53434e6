//! Snapshot-cache backends.

pub mod memory;
pub mod redis;

pub use memory::InMemorySnapshotCache;
pub use redis::RedisSnapshotCache;

use async_trait::async_trait;

use crate::core::BootstrapError;

/// Abstraction over the shared cache the live run-state snapshot is
/// published to. Failure is non-fatal to the bootstrap; the reconciler logs
/// and proceeds.
#[async_trait]
pub trait SnapshotCache: Send + Sync {
    /// Publish a serialized snapshot under a well-known key.
    async fn set(&self, key: &str, value: serde_json::Value) -> Result<(), BootstrapError>;

    /// Read a previously published snapshot.
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, BootstrapError>;
}
