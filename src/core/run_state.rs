//! Live run-state: the in-process view of currently scheduled jobs.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::core::job::{JobConfig, JobKey};
use crate::core::scheduler::JobScheduler;

/// The two live mappings, keyed by job key, owned by one structure and
/// shared by reference with the reconciler and the admin surface.
///
/// Writes happen on the single bootstrap writer (and, later, the admin
/// path); reads are concurrent. A job is present in both maps or in
/// neither.
#[derive(Default)]
pub struct RunState {
    schedulers: RwLock<HashMap<JobKey, Arc<JobScheduler>>>,
    configs: RwLock<HashMap<JobKey, JobConfig>>,
}

impl RunState {
    /// Empty run state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a job that reached the LIVE state: its scheduler handle and
    /// its configuration row, under the same key.
    pub fn publish(&self, scheduler: Arc<JobScheduler>, config: JobConfig) {
        let key = config.job_key.clone();
        self.schedulers.write().insert(key.clone(), scheduler);
        self.configs.write().insert(key, config);
    }

    /// Live scheduler handle for a job key.
    #[must_use]
    pub fn scheduler(&self, key: &str) -> Option<Arc<JobScheduler>> {
        self.schedulers.read().get(key).cloned()
    }

    /// Live configuration row for a job key.
    #[must_use]
    pub fn config(&self, key: &str) -> Option<JobConfig> {
        self.configs.read().get(key).cloned()
    }

    /// Keys of every live job, sorted.
    #[must_use]
    pub fn job_keys(&self) -> Vec<JobKey> {
        let mut keys: Vec<_> = self.configs.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Clone of the full configs map, for snapshot publication.
    #[must_use]
    pub fn configs_snapshot(&self) -> HashMap<JobKey, JobConfig> {
        self.configs.read().clone()
    }

    /// Number of live jobs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.configs.read().len()
    }

    /// Whether no job is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.configs.read().is_empty()
    }
}
