//! Core domain model and the bootstrap reconciliation engine.

pub mod error;
pub mod event_log;
pub mod executor;
pub mod job;
pub mod reconciler;
pub mod registry;
pub mod run_state;
pub mod scheduler;

pub use error::{AppResult, BootstrapError};
pub use event_log::{EventRecord, EventSink, InMemoryEventSink, PostgresEventSink, TAG_START_JOBS};
pub use executor::{DataflowJob, JobExecutor, ShardContext, SimpleJob};
pub use job::{
    node_tail, parse_cron, parse_shard_params, JobConfig, JobKey, JobKind, JobMeta, JobStatus,
    AUTO_USER, DEFAULT_CRON, SYSTEM_LISTENER_KEY, SYS_JOB_CONFIG_MAP_KEY,
};
pub use reconciler::{BootstrapSummary, Reconciler};
pub use registry::{JobDeclaration, JobRegistry};
pub use run_state::RunState;
pub use scheduler::{JobScheduler, SchedulerFactory, SchedulerState, Spawn, SpawnHandle};
