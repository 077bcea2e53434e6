//! The bootstrap reconciliation engine.
//!
//! Converges three sources of truth at process start: the job
//! implementations compiled into the image (registry), the persisted
//! job-configuration rows (store), and the presence nodes in the
//! coordination tree. Jobs in code but not in the store are materialized
//! with annotation defaults; rows without code are pruned, with their
//! coordination nodes; every surviving job gets a scheduler registered with
//! its persisted startup intent.
//!
//! Failure policy: a failed `list_all` aborts the whole bootstrap (no ground
//! truth, nothing is mutated). Every other failure is terminal to the one
//! job or sweep step that produced it, never to the reconciler. Nothing
//! escapes [`Reconciler::bootstrap`].

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::core::event_log::{EventSink, TAG_START_JOBS};
use crate::core::job::{node_tail, JobConfig, JobKey, SYS_JOB_CONFIG_MAP_KEY};
use crate::core::registry::JobRegistry;
use crate::core::run_state::RunState;
use crate::core::scheduler::SchedulerFactory;
use crate::core::BootstrapError;
use crate::infra::cache::SnapshotCache;
use crate::infra::coordination::CoordinationTree;
use crate::infra::store::ConfigStore;

/// Outcome counters for one bootstrap pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapSummary {
    /// Jobs that reached the LIVE state.
    pub live: usize,
    /// Jobs whose scheduler could not be built, initialized, or registered.
    pub failed: usize,
    /// Jobs whose fresh row could not be inserted; never scheduled.
    pub dropped: usize,
    /// Stale rows removed from the store.
    pub stale_rows_removed: usize,
    /// Stale nodes removed from the coordination tree.
    pub stale_nodes_removed: usize,
    /// Whether the pass aborted before reconciling (store unavailable).
    pub aborted: bool,
}

/// Three-way reconciliation engine. One instance per process; run once at
/// boot by a single writer.
pub struct Reconciler {
    registry: Arc<JobRegistry>,
    store: Arc<dyn ConfigStore>,
    coordination: Arc<dyn CoordinationTree>,
    cache: Arc<dyn SnapshotCache>,
    events: Arc<dyn EventSink>,
    run_state: Arc<RunState>,
    factory: SchedulerFactory,
    default_cron: String,
}

impl std::fmt::Debug for Reconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconciler")
            .field("default_cron", &self.default_cron)
            .finish_non_exhaustive()
    }
}

impl Reconciler {
    /// Wire a reconciler from its collaborators.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        registry: Arc<JobRegistry>,
        store: Arc<dyn ConfigStore>,
        coordination: Arc<dyn CoordinationTree>,
        cache: Arc<dyn SnapshotCache>,
        events: Arc<dyn EventSink>,
        run_state: Arc<RunState>,
        factory: SchedulerFactory,
        default_cron: impl Into<String>,
    ) -> Self {
        Self {
            registry,
            store,
            coordination,
            cache,
            events,
            run_state,
            factory,
            default_cron: default_cron.into(),
        }
    }

    /// The live run-state this reconciler populates.
    #[must_use]
    pub const fn run_state(&self) -> &Arc<RunState> {
        &self.run_state
    }

    /// Run one bootstrap pass. Never propagates an error; the summary and
    /// the event log carry the outcome.
    pub async fn bootstrap(&self) -> BootstrapSummary {
        let mut summary = BootstrapSummary::default();

        let code = self.registry.enumerate();
        let db = match self.store.list_all().await {
            Ok(rows) => rows,
            Err(e) => {
                // Fatal: without the ground truth no reconciliation is
                // possible. Nothing has been mutated yet.
                tracing::error!("bootstrap aborted, listing job configs failed: {e}");
                self.events.record(
                    TAG_START_JOBS,
                    &format!("bootstrap aborted: listing job configs failed: {e}"),
                );
                summary.aborted = true;
                return summary;
            }
        };

        // Partition the store rows: rows whose job still exists in code are
        // kept (first occurrence wins on duplicate keys, in list order);
        // the rest are stale and deleted after the survivors are up.
        let mut kept: HashMap<JobKey, JobConfig> = HashMap::new();
        let mut stale: Vec<JobConfig> = Vec::new();
        for row in db {
            if self.registry.contains(&row.job_key) {
                kept.entry(row.job_key.clone()).or_insert(row);
            } else {
                stale.push(row);
            }
        }

        // Survivor keys guard the coordination sweep: kept rows plus rows
        // inserted on this pass. A FAILED job keeps its node; its row still
        // exists and the next boot will retry.
        let mut survivors: HashSet<JobKey> = kept.keys().cloned().collect();

        for (key, decl) in code {
            let cfg = if let Some(existing) = kept.get(&key) {
                existing.clone()
            } else {
                let fresh = JobConfig::materialize(&key, &decl.meta, &self.default_cron);
                match self.store.insert(fresh).await {
                    Ok(stored) => {
                        tracing::info!(job = %key, "materialized fresh job config");
                        survivors.insert(key.clone());
                        stored
                    }
                    Err(e) => {
                        // DROPPED: uncommitted state is never scheduled or
                        // published.
                        summary.dropped += 1;
                        self.events.record(
                            TAG_START_JOBS,
                            &format!("job `{key}` dropped: config insert failed: {e}"),
                        );
                        continue;
                    }
                }
            };

            match self.start_job(&cfg).await {
                Ok(true) => summary.live += 1,
                Ok(false) => {
                    summary.failed += 1;
                    self.events.record(
                        TAG_START_JOBS,
                        &format!("job `{key}` failed: no executor bound for its key"),
                    );
                }
                Err(e) => {
                    summary.failed += 1;
                    self.events.record(
                        TAG_START_JOBS,
                        &format!("job `{key}` failed to schedule: {e}"),
                    );
                }
            }
        }

        // Coordination pruning, only after every survivor has had its
        // chance to register: a surviving job's node must never be deleted
        // mid-setup.
        match self.coordination.list_children("/").await {
            Ok(children) => {
                for node in children {
                    if survivors.contains(node_tail(&node)) {
                        continue;
                    }
                    match self.coordination.delete_node(&node).await {
                        Ok(()) => {
                            summary.stale_nodes_removed += 1;
                            tracing::info!(node = %node, "pruned stale coordination node");
                        }
                        Err(e) => {
                            tracing::error!(node = %node, "failed to prune coordination node: {e}");
                        }
                    }
                }
            }
            Err(e) => {
                tracing::error!("listing coordination children failed, pruning skipped: {e}");
            }
        }

        // Database pruning after the coordination sweep: if the process
        // dies in between, the next boot still recognizes the stale rows.
        let stale_ids: Vec<i64> = stale.iter().filter_map(|r| r.id).collect();
        if !stale_ids.is_empty() {
            match self.store.remove_by_ids(&stale_ids).await {
                Ok(removed) => {
                    summary.stale_rows_removed = removed;
                    tracing::info!(removed, "pruned stale job configs");
                }
                Err(e) => {
                    self.events.record(
                        TAG_START_JOBS,
                        &format!("pruning stale job configs failed: {e}"),
                    );
                }
            }
        }

        // Snapshot publication is last and best-effort.
        self.publish_snapshot().await;

        tracing::info!(
            live = summary.live,
            failed = summary.failed,
            dropped = summary.dropped,
            "bootstrap finished"
        );
        summary
    }

    /// Schedule one surviving job. `Ok(false)` means no executor is bound;
    /// `Err` covers build, init, and registration failures. On `Ok(true)`
    /// the job is LIVE and present in both run-state maps.
    async fn start_job(&self, cfg: &JobConfig) -> Result<bool, BootstrapError> {
        let Some(handle) = self.factory.build(cfg)? else {
            return Ok(false);
        };
        handle.init()?;
        handle.register_startup_intent(cfg.status.is_start()).await?;
        self.run_state.publish(handle, cfg.clone());
        Ok(true)
    }

    async fn publish_snapshot(&self) {
        let snapshot = self.run_state.configs_snapshot();
        let value = match serde_json::to_value(&snapshot) {
            Ok(v) => v,
            Err(e) => {
                tracing::error!("serializing config snapshot failed: {e}");
                return;
            }
        };
        if let Err(e) = self.cache.set(SYS_JOB_CONFIG_MAP_KEY, value).await {
            self.events.record(
                TAG_START_JOBS,
                &format!("publishing config snapshot failed: {e}"),
            );
        }
    }
}
