//! Config-store backends.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryConfigStore;
pub use postgres::PostgresConfigStore;

use async_trait::async_trait;

use crate::core::job::JobConfig;
use crate::core::BootstrapError;

/// Abstraction over the persistent job-configuration table.
///
/// Individual inserts are atomic; no cross-operation transaction is
/// required. Invariant enforcement is the reconciler's business, not the
/// adapter's — with one exception: the unique constraint on the job key,
/// which is what arbitrates concurrent bootstraps racing to insert the same
/// missing row.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// List every persisted row. Row order is not significant.
    async fn list_all(&self) -> Result<Vec<JobConfig>, BootstrapError>;

    /// Insert a new row, returning the stored copy with its assigned id.
    ///
    /// A row whose `job_key` already exists fails with
    /// [`BootstrapError::DuplicateKey`].
    async fn insert(&self, cfg: JobConfig) -> Result<JobConfig, BootstrapError>;

    /// Delete rows by id, returning how many were removed.
    async fn remove_by_ids(&self, ids: &[i64]) -> Result<usize, BootstrapError>;
}
