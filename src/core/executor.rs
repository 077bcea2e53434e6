//! Job execution traits and the shard context handed to them.

use async_trait::async_trait;
use std::sync::Arc;

use crate::core::AppResult;
use crate::core::job::JobKind;

/// Context for one shard of one fire of a job.
#[derive(Debug, Clone)]
pub struct ShardContext {
    /// Key of the job being fired.
    pub job_key: String,
    /// Index of this shard, in `[0, shard_total)`.
    pub shard_index: u32,
    /// Total number of logical shard partitions.
    pub shard_total: u32,
    /// Label configured for this shard index, if any.
    pub shard_param: Option<String>,
}

/// One-shot job contract: executed once per fire, per shard.
#[async_trait]
pub trait SimpleJob: Send + Sync + 'static {
    /// Run the business payload for one shard.
    async fn execute(&self, ctx: &ShardContext) -> AppResult<()>;
}

/// Dataflow job contract: per fire and shard, a batch is fetched and, when
/// non-empty, processed.
#[async_trait]
pub trait DataflowJob: Send + Sync + 'static {
    /// Fetch the next batch for one shard. An empty batch skips processing.
    async fn fetch(&self, ctx: &ShardContext) -> AppResult<Vec<serde_json::Value>>;

    /// Process a non-empty batch for one shard.
    async fn process(&self, ctx: &ShardContext, items: Vec<serde_json::Value>) -> AppResult<()>;
}

/// Executor resolved from the registry; the opaque payload the scheduler
/// factory receives.
#[derive(Clone)]
pub enum JobExecutor {
    /// Simple one-shot executor.
    Simple(Arc<dyn SimpleJob>),
    /// Fetch-then-process executor.
    Dataflow(Arc<dyn DataflowJob>),
}

impl JobExecutor {
    /// Kind of the underlying contract.
    #[must_use]
    pub fn kind(&self) -> JobKind {
        match self {
            Self::Simple(_) => JobKind::Simple,
            Self::Dataflow(_) => JobKind::Dataflow,
        }
    }

    /// Run one shard of one fire, dispatching on the contract.
    pub async fn run_shard(&self, ctx: &ShardContext) -> AppResult<()> {
        match self {
            Self::Simple(job) => job.execute(ctx).await,
            Self::Dataflow(job) => {
                let items = job.fetch(ctx).await?;
                if items.is_empty() {
                    return Ok(());
                }
                job.process(ctx, items).await
            }
        }
    }
}

impl std::fmt::Debug for JobExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Simple(_) => f.write_str("JobExecutor::Simple"),
            Self::Dataflow(_) => f.write_str("JobExecutor::Dataflow"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingDataflow {
        fetched: AtomicUsize,
        processed: AtomicUsize,
        batch: Vec<serde_json::Value>,
    }

    #[async_trait]
    impl DataflowJob for Arc<CountingDataflow> {
        async fn fetch(&self, _ctx: &ShardContext) -> AppResult<Vec<serde_json::Value>> {
            self.fetched.fetch_add(1, Ordering::SeqCst);
            Ok(self.batch.clone())
        }

        async fn process(
            &self,
            _ctx: &ShardContext,
            _items: Vec<serde_json::Value>,
        ) -> AppResult<()> {
            self.processed.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn ctx() -> ShardContext {
        ShardContext {
            job_key: "j".into(),
            shard_index: 0,
            shard_total: 1,
            shard_param: None,
        }
    }

    #[tokio::test]
    async fn dataflow_skips_process_on_empty_fetch() {
        let inner = Arc::new(CountingDataflow {
            fetched: AtomicUsize::new(0),
            processed: AtomicUsize::new(0),
            batch: Vec::new(),
        });
        let exec = JobExecutor::Dataflow(Arc::new(Arc::clone(&inner)));
        exec.run_shard(&ctx()).await.unwrap();
        assert_eq!(inner.fetched.load(Ordering::SeqCst), 1);
        assert_eq!(inner.processed.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn dataflow_processes_non_empty_fetch() {
        let inner = Arc::new(CountingDataflow {
            fetched: AtomicUsize::new(0),
            processed: AtomicUsize::new(0),
            batch: vec![serde_json::json!({"row": 1})],
        });
        let exec = JobExecutor::Dataflow(Arc::new(Arc::clone(&inner)));
        exec.run_shard(&ctx()).await.unwrap();
        assert_eq!(inner.processed.load(Ordering::SeqCst), 1);
    }
}
