//! Error types for bootstrap and scheduling operations.

use thiserror::Error;

/// Errors produced by bootstrap components.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Config-store failure with context.
    #[error("store error: {0}")]
    Store(String),
    /// Insert hit the unique constraint on the job key.
    #[error("duplicate job key: {0}")]
    DuplicateKey(String),
    /// Coordination-tree failure with context.
    #[error("coordination error: {0}")]
    Coordination(String),
    /// Shared-cache failure with context.
    #[error("cache error: {0}")]
    Cache(String),
    /// A job key is registered under both job kinds.
    #[error("job key registered twice: {0}")]
    KeyCollision(String),
    /// No executor is bound for the job key.
    #[error("no executor bound for job key: {0}")]
    ExecutorMissing(String),
    /// Cron expression failed to parse.
    #[error("invalid cron expression `{expr}`: {reason}")]
    InvalidCron {
        /// The offending expression.
        expr: String,
        /// Parser diagnostics.
        reason: String,
    },
    /// Sharding item params reference an out-of-range shard index.
    #[error("invalid sharding item params: {0}")]
    InvalidShardParams(String),
    /// Scheduler handle used out of lifecycle order.
    #[error("scheduler in invalid state: {0}")]
    InvalidState(String),
    /// Bootstrap configuration rejected.
    #[error("config invalid: {0}")]
    Config(String),
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
