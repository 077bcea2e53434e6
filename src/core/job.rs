//! Job domain model: keys, kinds, persisted configuration rows, and
//! annotation-style metadata.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::BootstrapError;

/// Identifier of a job implementation. Globally unique in the image; equals
/// both the registry key and the trailing dotted segment of the job's
/// coordination node name.
pub type JobKey = String;

/// Cron expression applied to jobs that declare none.
pub const DEFAULT_CRON: &str = "0 0/10 * * * ?";

/// Job key of the self-managing system listener job. Fresh rows for this key
/// are materialized with [`JobStatus::Start`]; every other fresh row starts
/// stopped until an operator enables it.
pub const SYSTEM_LISTENER_KEY: &str = "systemListenerJob";

/// Well-known cache key under which the live configs snapshot is published.
pub const SYS_JOB_CONFIG_MAP_KEY: &str = "sys:job:config:map";

/// Audit-field sentinel for rows the bootstrap materializes itself.
pub const AUTO_USER: &str = "Sys-Auto";

/// Placeholder stored when a job declares no sharding item params.
pub const SHARD_PARAMS_PLACEHOLDER: &str =
    "auto-filled: job declared no sharding item params, add them by hand";

/// Placeholder stored when a job declares no description.
pub const REMARK_PLACEHOLDER: &str =
    "auto-filled: job declared no description, add one by hand";

/// Base kind of a job implementation, selecting its executor contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobKind {
    /// One-shot execution per fire, per shard.
    Simple,
    /// Fetch-then-process execution per fire, per shard.
    Dataflow,
}

/// Run status of a configured job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JobStatus {
    /// The scheduler fires the job on its cron schedule.
    Start,
    /// The scheduler is registered but does not fire.
    Stop,
}

impl JobStatus {
    /// Whether the scheduler should actually fire.
    #[must_use]
    pub const fn is_start(self) -> bool {
        matches!(self, Self::Start)
    }
}

/// Annotation-style metadata attached to a job implementation at
/// registration time. Consulted only when no persisted row exists yet.
#[derive(Debug, Clone, Default)]
pub struct JobMeta {
    /// Cron expression; [`DEFAULT_CRON`] when absent.
    pub cron: Option<String>,
    /// Sharding total count; 1 when absent.
    pub shard_total: Option<u32>,
    /// Sharding item params; placeholder when absent.
    pub shard_params: Option<String>,
    /// Free-form description; placeholder when absent.
    pub description: Option<String>,
}

impl JobMeta {
    /// Empty metadata; every default applies.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cron expression.
    #[must_use]
    pub fn with_cron(mut self, cron: impl Into<String>) -> Self {
        self.cron = Some(cron.into());
        self
    }

    /// Set the sharding total count.
    #[must_use]
    pub const fn with_shard_total(mut self, total: u32) -> Self {
        self.shard_total = Some(total);
        self
    }

    /// Set the sharding item params (`index=label` pairs, comma separated).
    #[must_use]
    pub fn with_shard_params(mut self, params: impl Into<String>) -> Self {
        self.shard_params = Some(params.into());
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Persisted job-configuration row.
///
/// The serialized form keeps the wire field names of the original system
/// (`jobKey`, `cronExpression`, ...) so cache readers stay compatible across
/// versions; unknown fields are tolerated on the way in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobConfig {
    /// Storage-assigned row id; `None` until the row has been inserted.
    #[serde(default)]
    pub id: Option<i64>,
    /// Unique job key; primary logical identifier.
    pub job_key: JobKey,
    /// Number of logical shard partitions, at least 1.
    pub sharding_total_count: u32,
    /// `index=label` pairs mapping shard indexes to executor labels.
    pub sharding_item_params: String,
    /// Six- or seven-field cron expression.
    pub cron_expression: String,
    /// Free-form description.
    pub remark: String,
    /// Current run status.
    pub status: JobStatus,
    /// Creator audit field.
    pub create_user: String,
    /// Creation audit timestamp.
    pub create_time: DateTime<Utc>,
    /// Updater audit field.
    pub update_user: String,
    /// Update audit timestamp.
    pub update_time: DateTime<Utc>,
}

impl JobConfig {
    /// Materialize a fresh row for a job the store does not know yet,
    /// applying annotation defaults and the `Sys-Auto` audit sentinel.
    ///
    /// Status is [`JobStatus::Start`] only for [`SYSTEM_LISTENER_KEY`];
    /// operators enable every other job through the admin path.
    #[must_use]
    pub fn materialize(job_key: &str, meta: &JobMeta, default_cron: &str) -> Self {
        let now = Utc::now();
        let status = if job_key == SYSTEM_LISTENER_KEY {
            JobStatus::Start
        } else {
            JobStatus::Stop
        };
        Self {
            id: None,
            job_key: job_key.to_owned(),
            sharding_total_count: meta.shard_total.unwrap_or(1),
            sharding_item_params: meta
                .shard_params
                .clone()
                .unwrap_or_else(|| SHARD_PARAMS_PLACEHOLDER.to_owned()),
            cron_expression: meta
                .cron
                .clone()
                .unwrap_or_else(|| default_cron.to_owned()),
            remark: meta
                .description
                .clone()
                .unwrap_or_else(|| REMARK_PLACEHOLDER.to_owned()),
            status,
            create_user: AUTO_USER.to_owned(),
            create_time: now,
            update_user: AUTO_USER.to_owned(),
            update_time: now,
        }
    }

    /// Validate the data-model invariants: sharding total at least 1, every
    /// declared shard index below the total, and a parseable cron.
    pub fn validate(&self) -> Result<(), BootstrapError> {
        if self.sharding_total_count == 0 {
            return Err(BootstrapError::InvalidShardParams(format!(
                "job `{}`: sharding total count must be at least 1",
                self.job_key
            )));
        }
        let params = parse_shard_params(&self.sharding_item_params);
        if let Some(index) = params.keys().find(|i| **i >= self.sharding_total_count) {
            return Err(BootstrapError::InvalidShardParams(format!(
                "job `{}`: shard index {} out of range (total {})",
                self.job_key, index, self.sharding_total_count
            )));
        }
        parse_cron(&self.cron_expression)?;
        Ok(())
    }
}

/// Parse a cron expression, mapping parser diagnostics into
/// [`BootstrapError::InvalidCron`].
pub fn parse_cron(expr: &str) -> Result<cron::Schedule, BootstrapError> {
    cron::Schedule::from_str(expr).map_err(|e| BootstrapError::InvalidCron {
        expr: expr.to_owned(),
        reason: e.to_string(),
    })
}

/// Parse `index=label` pairs from a sharding-item-params string.
///
/// Lenient on purpose: segments that do not look like `index=label` are
/// skipped, so the auto-filled placeholder text never trips validation. Only
/// well-formed pairs participate in range checking and shard labeling.
#[must_use]
pub fn parse_shard_params(raw: &str) -> BTreeMap<u32, String> {
    let mut params = BTreeMap::new();
    for segment in raw.split(',') {
        let Some((index, label)) = segment.split_once('=') else {
            continue;
        };
        let Ok(index) = index.trim().parse::<u32>() else {
            continue;
        };
        params.insert(index, label.trim().to_owned());
    }
    params
}

/// Extract the job key from a coordination node name: the substring after
/// the final `.`, or the whole name when it contains none.
#[must_use]
pub fn node_tail(node: &str) -> &str {
    node.rsplit('.').next().unwrap_or(node)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn materialize_applies_defaults() {
        let cfg = JobConfig::materialize("orderSyncJob", &JobMeta::new(), DEFAULT_CRON);
        assert_eq!(cfg.sharding_total_count, 1);
        assert_eq!(cfg.sharding_item_params, SHARD_PARAMS_PLACEHOLDER);
        assert_eq!(cfg.cron_expression, DEFAULT_CRON);
        assert_eq!(cfg.remark, REMARK_PLACEHOLDER);
        assert_eq!(cfg.status, JobStatus::Stop);
        assert_eq!(cfg.create_user, AUTO_USER);
        assert!(cfg.id.is_none());
    }

    #[test]
    fn materialize_starts_system_listener() {
        let cfg = JobConfig::materialize(SYSTEM_LISTENER_KEY, &JobMeta::new(), DEFAULT_CRON);
        assert_eq!(cfg.status, JobStatus::Start);
    }

    #[test]
    fn materialize_honors_meta() {
        let meta = JobMeta::new()
            .with_cron("0 0 * * * ?")
            .with_shard_total(4)
            .with_shard_params("0=a,1=b,2=c,3=d")
            .with_description("inventory refresh");
        let cfg = JobConfig::materialize("inventoryJob", &meta, DEFAULT_CRON);
        assert_eq!(cfg.cron_expression, "0 0 * * * ?");
        assert_eq!(cfg.sharding_total_count, 4);
        assert_eq!(cfg.sharding_item_params, "0=a,1=b,2=c,3=d");
        assert_eq!(cfg.remark, "inventory refresh");
    }

    #[test]
    fn validate_rejects_out_of_range_shard_index() {
        let mut cfg = JobConfig::materialize("j", &JobMeta::new().with_shard_total(2), DEFAULT_CRON);
        cfg.sharding_item_params = "0=a,2=c".into();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_accepts_placeholder_params() {
        let cfg = JobConfig::materialize("j", &JobMeta::new(), DEFAULT_CRON);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_total() {
        let mut cfg = JobConfig::materialize("j", &JobMeta::new(), DEFAULT_CRON);
        cfg.sharding_total_count = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_cron() {
        let mut cfg = JobConfig::materialize("j", &JobMeta::new(), DEFAULT_CRON);
        cfg.cron_expression = "not a cron".into();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn shard_params_parse_pairs() {
        let params = parse_shard_params("0=alpha, 1=beta,2=gamma");
        assert_eq!(params.len(), 3);
        assert_eq!(params[&0], "alpha");
        assert_eq!(params[&1], "beta");
        assert_eq!(params[&2], "gamma");
    }

    #[test]
    fn shard_params_skip_malformed_segments() {
        let params = parse_shard_params(SHARD_PARAMS_PLACEHOLDER);
        assert!(params.is_empty());
        let params = parse_shard_params("0=a,notapair,x=b,1=c");
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn node_tail_takes_last_segment() {
        assert_eq!(node_tail("com.acme.jobs.orderSyncJob"), "orderSyncJob");
        assert_eq!(node_tail("ns.a"), "a");
        assert_eq!(node_tail("bare"), "bare");
    }

    #[test]
    fn config_serializes_camel_case() {
        let cfg = JobConfig::materialize("j", &JobMeta::new(), DEFAULT_CRON);
        let value = serde_json::to_value(&cfg).unwrap();
        assert!(value.get("jobKey").is_some());
        assert!(value.get("cronExpression").is_some());
        assert!(value.get("shardingTotalCount").is_some());
        assert_eq!(value["status"], "STOP");
    }
}
