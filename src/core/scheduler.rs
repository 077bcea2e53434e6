//! Per-job scheduler handles and the factory that builds them.
//!
//! A [`JobScheduler`] walks a fixed lifecycle: built by the factory in the
//! `Created` state, moved to `Initialized` by [`JobScheduler::init`], then
//! registered via [`JobScheduler::register_startup_intent`], which creates
//! the job's presence node in the coordination tree and, when the startup
//! intent is `start`, spawns the cron loop. Dropping the handle stops the
//! loop.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use parking_lot::Mutex;
use tokio::sync::watch;

use crate::core::executor::{JobExecutor, ShardContext};
use crate::core::job::{parse_cron, parse_shard_params, JobConfig, JobKey};
use crate::core::registry::JobRegistry;
use crate::core::BootstrapError;
use crate::infra::coordination::CoordinationTree;

/// Abstraction for spawning task execution on a runtime.
pub trait Spawn {
    /// Spawn an async task that returns a future.
    fn spawn<F>(&self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static;
}

type BoxFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Object-safe handle over a [`Spawn`] implementation, so non-generic
/// components can hold a spawner.
#[derive(Clone)]
pub struct SpawnHandle {
    inner: Arc<dyn Fn(BoxFuture) + Send + Sync>,
}

impl SpawnHandle {
    /// Wrap a spawner.
    pub fn new<S>(spawner: S) -> Self
    where
        S: Spawn + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(move |fut| spawner.spawn(fut)),
        }
    }

    fn spawn(&self, fut: impl Future<Output = ()> + Send + 'static) {
        (self.inner)(Box::pin(fut));
    }
}

/// Lifecycle state of a scheduler handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Built, not yet initialized.
    Created,
    /// Initialized, startup intent not yet registered.
    Initialized,
    /// Registered with the coordination service.
    Registered {
        /// Whether the cron loop is running.
        started: bool,
    },
}

/// Live scheduler handle for one job.
pub struct JobScheduler {
    job_key: JobKey,
    namespace: String,
    schedule: cron::Schedule,
    shards: Vec<ShardContext>,
    executor: JobExecutor,
    coordination: Arc<dyn CoordinationTree>,
    spawner: SpawnHandle,
    state: Mutex<SchedulerState>,
    shutdown_tx: watch::Sender<bool>,
}

impl JobScheduler {
    /// Key of the job this handle schedules.
    #[must_use]
    pub fn job_key(&self) -> &str {
        &self.job_key
    }

    /// Name of the presence node this scheduler registers:
    /// `<namespace>.<jobKey>`.
    #[must_use]
    pub fn node_name(&self) -> String {
        format!("{}.{}", self.namespace, self.job_key)
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SchedulerState {
        *self.state.lock()
    }

    /// Move the handle from `Created` to `Initialized`.
    pub fn init(&self) -> Result<(), BootstrapError> {
        let mut state = self.state.lock();
        if *state != SchedulerState::Created {
            return Err(BootstrapError::InvalidState(format!(
                "job `{}`: init called in state {state:?}",
                self.job_key
            )));
        }
        *state = SchedulerState::Initialized;
        tracing::debug!(job = %self.job_key, "scheduler initialized");
        Ok(())
    }

    /// Register the scheduler with the coordination service and record the
    /// startup intent. When `start` is true the cron loop is spawned;
    /// otherwise the job stays registered but dormant until the admin path
    /// starts it.
    pub async fn register_startup_intent(&self, start: bool) -> Result<(), BootstrapError> {
        {
            let state = self.state.lock();
            if *state != SchedulerState::Initialized {
                return Err(BootstrapError::InvalidState(format!(
                    "job `{}`: register_startup_intent called in state {state:?}",
                    self.job_key
                )));
            }
        }

        self.coordination.create_node(&self.node_name()).await?;

        if start {
            let job_key = self.job_key.clone();
            let schedule = self.schedule.clone();
            let shards = self.shards.clone();
            let executor = self.executor.clone();
            let shutdown_rx = self.shutdown_tx.subscribe();
            self.spawner
                .spawn(run_cron_loop(job_key, schedule, shards, executor, shutdown_rx));
        }

        *self.state.lock() = SchedulerState::Registered { started: start };
        tracing::info!(job = %self.job_key, started = start, "scheduler registered");
        Ok(())
    }

    /// Stop the cron loop. Idempotent; also happens implicitly when the
    /// handle is dropped.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }
}

async fn run_cron_loop(
    job_key: JobKey,
    schedule: cron::Schedule,
    shards: Vec<ShardContext>,
    executor: JobExecutor,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    loop {
        let Some(next) = schedule.upcoming(Utc).next() else {
            tracing::warn!(job = %job_key, "cron schedule has no upcoming fire time");
            break;
        };
        let delay = (next - Utc::now()).to_std().unwrap_or(Duration::ZERO);

        tokio::select! {
            () = tokio::time::sleep(delay) => {
                for ctx in &shards {
                    if let Err(e) = executor.run_shard(ctx).await {
                        tracing::error!(
                            job = %job_key,
                            shard = ctx.shard_index,
                            "job fire failed: {e:#}"
                        );
                    }
                }
            }
            // Fires on an explicit shutdown and when the handle is dropped.
            _ = shutdown_rx.changed() => {
                tracing::info!(job = %job_key, "cron loop stopping");
                break;
            }
        }
    }
}

/// Builds uninitialized scheduler handles from persisted configuration.
pub struct SchedulerFactory {
    registry: Arc<JobRegistry>,
    coordination: Arc<dyn CoordinationTree>,
    namespace: String,
    spawner: SpawnHandle,
}

impl SchedulerFactory {
    /// Create a factory for a deployment namespace.
    pub fn new(
        registry: Arc<JobRegistry>,
        coordination: Arc<dyn CoordinationTree>,
        namespace: impl Into<String>,
        spawner: SpawnHandle,
    ) -> Self {
        Self {
            registry,
            coordination,
            namespace: namespace.into(),
            spawner,
        }
    }

    /// Build a scheduler handle for a configured job.
    ///
    /// The executor is resolved from the registry by job key; a missing
    /// executor yields a logged warning and `Ok(None)` so sibling jobs keep
    /// bootstrapping. Invalid cron or sharding configuration is an error.
    /// The returned handle has not been initialized yet.
    pub fn build(&self, cfg: &JobConfig) -> Result<Option<Arc<JobScheduler>>, BootstrapError> {
        let Some(executor) = self.registry.lookup(&cfg.job_key) else {
            tracing::warn!(
                job = %cfg.job_key,
                "no executor bound for job key, scheduler not built"
            );
            return Ok(None);
        };

        cfg.validate()?;
        let schedule = parse_cron(&cfg.cron_expression)?;
        let params = parse_shard_params(&cfg.sharding_item_params);
        let shards = (0..cfg.sharding_total_count)
            .map(|index| ShardContext {
                job_key: cfg.job_key.clone(),
                shard_index: index,
                shard_total: cfg.sharding_total_count,
                shard_param: params.get(&index).cloned(),
            })
            .collect();

        let (shutdown_tx, _) = watch::channel(false);
        Ok(Some(Arc::new(JobScheduler {
            job_key: cfg.job_key.clone(),
            namespace: self.namespace.clone(),
            schedule,
            shards,
            executor,
            coordination: Arc::clone(&self.coordination),
            spawner: self.spawner.clone(),
            state: Mutex::new(SchedulerState::Created),
            shutdown_tx,
        })))
    }
}
