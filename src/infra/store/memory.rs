//! In-memory config store for development and testing.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::core::job::JobConfig;
use crate::core::BootstrapError;
use crate::infra::store::ConfigStore;

/// In-memory config store. Assigns monotonically increasing row ids and
/// enforces the unique constraint on the job key.
#[derive(Default)]
pub struct InMemoryConfigStore {
    rows: Mutex<Vec<JobConfig>>,
    next_id: AtomicI64,
}

impl InMemoryConfigStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Seed the store with pre-existing rows, assigning ids to rows that
    /// lack one. Test setup helper.
    pub fn seed(&self, rows: impl IntoIterator<Item = JobConfig>) {
        let mut stored = self.rows.lock();
        for mut row in rows {
            if row.id.is_none() {
                row.id = Some(self.next_id.fetch_add(1, Ordering::SeqCst));
            }
            stored.push(row);
        }
    }
}

#[async_trait]
impl ConfigStore for InMemoryConfigStore {
    async fn list_all(&self) -> Result<Vec<JobConfig>, BootstrapError> {
        Ok(self.rows.lock().clone())
    }

    async fn insert(&self, mut cfg: JobConfig) -> Result<JobConfig, BootstrapError> {
        let mut rows = self.rows.lock();
        if rows.iter().any(|r| r.job_key == cfg.job_key) {
            return Err(BootstrapError::DuplicateKey(cfg.job_key));
        }
        cfg.id = Some(self.next_id.fetch_add(1, Ordering::SeqCst));
        rows.push(cfg.clone());
        Ok(cfg)
    }

    async fn remove_by_ids(&self, ids: &[i64]) -> Result<usize, BootstrapError> {
        let mut rows = self.rows.lock();
        let before = rows.len();
        rows.retain(|r| r.id.is_none_or(|id| !ids.contains(&id)));
        Ok(before - rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::job::{JobMeta, DEFAULT_CRON};

    fn row(key: &str) -> JobConfig {
        JobConfig::materialize(key, &JobMeta::new(), DEFAULT_CRON)
    }

    #[tokio::test]
    async fn insert_assigns_ids() {
        let store = InMemoryConfigStore::new();
        let a = store.insert(row("a")).await.unwrap();
        let b = store.insert(row("b")).await.unwrap();
        assert_eq!(a.id, Some(1));
        assert_eq!(b.id, Some(2));
        assert_eq!(store.list_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_key() {
        let store = InMemoryConfigStore::new();
        store.insert(row("a")).await.unwrap();
        let err = store.insert(row("a")).await.unwrap_err();
        assert!(matches!(err, BootstrapError::DuplicateKey(k) if k == "a"));
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn remove_by_ids_counts_removed() {
        let store = InMemoryConfigStore::new();
        let a = store.insert(row("a")).await.unwrap();
        store.insert(row("b")).await.unwrap();
        let removed = store
            .remove_by_ids(&[a.id.unwrap(), 999])
            .await
            .unwrap();
        assert_eq!(removed, 1);
        let rest = store.list_all().await.unwrap();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].job_key, "b");
    }
}
