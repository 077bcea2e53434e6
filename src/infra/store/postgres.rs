//! Postgres-backed config store (schema and interface stubs).

use async_trait::async_trait;

use crate::core::job::JobConfig;
use crate::core::BootstrapError;
use crate::infra::store::ConfigStore;

/// Postgres config-store adapter placeholder.
pub struct PostgresConfigStore;

impl PostgresConfigStore {
    /// Migration statements for the job-configuration table. The unique
    /// index on `job_key` is what arbitrates concurrent bootstraps.
    #[must_use]
    pub const fn migrations() -> &'static [&'static str] {
        &[r#"
CREATE TABLE IF NOT EXISTS sc_job_config (
    id BIGSERIAL PRIMARY KEY,
    job_key TEXT NOT NULL,
    sharding_total_count INT NOT NULL DEFAULT 1,
    sharding_item_params TEXT NOT NULL,
    cron_expression TEXT NOT NULL,
    remark TEXT NOT NULL,
    status TEXT NOT NULL,
    create_user TEXT NOT NULL,
    create_time TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    update_user TEXT NOT NULL,
    update_time TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
CREATE UNIQUE INDEX IF NOT EXISTS uidx_sc_job_config_job_key ON sc_job_config (job_key);
"#]
    }
}

#[async_trait]
impl ConfigStore for PostgresConfigStore {
    async fn list_all(&self) -> Result<Vec<JobConfig>, BootstrapError> {
        Err(BootstrapError::Store(
            "postgres store not wired to database client".into(),
        ))
    }

    async fn insert(&self, _cfg: JobConfig) -> Result<JobConfig, BootstrapError> {
        Err(BootstrapError::Store(
            "postgres store not wired to database client".into(),
        ))
    }

    async fn remove_by_ids(&self, _ids: &[i64]) -> Result<usize, BootstrapError> {
        Err(BootstrapError::Store(
            "postgres store not wired to database client".into(),
        ))
    }
}
