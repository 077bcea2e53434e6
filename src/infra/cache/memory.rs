//! In-memory snapshot cache for development and testing.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::core::BootstrapError;
use crate::infra::cache::SnapshotCache;

/// In-memory snapshot cache.
#[derive(Default)]
pub struct InMemorySnapshotCache {
    entries: Mutex<HashMap<String, serde_json::Value>>,
}

impl InMemorySnapshotCache {
    /// Empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SnapshotCache for InMemorySnapshotCache {
    async fn set(&self, key: &str, value: serde_json::Value) -> Result<(), BootstrapError> {
        self.entries.lock().insert(key.to_owned(), value);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, BootstrapError> {
        Ok(self.entries.lock().get(key).cloned())
    }
}
