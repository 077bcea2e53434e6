//! # Shardcron
//!
//! A sharded cron-job bootstrap and lifecycle manager for clustered services.
//!
//! On process start, shardcron discovers every job implementation registered
//! in the image, reconciles that set against a persistent job-configuration
//! store and a hierarchical coordination tree, creates one scheduler per
//! surviving job, registers each scheduler with the coordination service, and
//! publishes the resulting live configuration to a shared cache for other
//! nodes to observe.
//!
//! ## The reconciliation problem
//!
//! Three sources of truth must converge at boot:
//!
//! - **Code**: the job implementations compiled into the running image
//! - **Store**: the persisted per-job configuration rows (cron, sharding, status)
//! - **Coordination tree**: presence nodes left behind by previous deployments
//!
//! Jobs present in code but missing from the store are materialized with
//! annotation-style defaults. Rows whose job no longer exists in code are
//! pruned, along with their coordination nodes. Any single job failing to
//! schedule never blocks its siblings; the event log is the authoritative
//! trail for partial failures.
//!
//! ## Quick tour
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use shardcron::builders::build_bootstrap_defaults;
//! use shardcron::config::BootstrapConfig;
//! use shardcron::core::{JobMeta, JobRegistry};
//! use shardcron::runtime::TokioSpawner;
//!
//! let mut registry = JobRegistry::new();
//! registry.register_simple("orderSyncJob", JobMeta::new().with_cron("0 0/5 * * * ?"), my_job)?;
//!
//! let cfg = BootstrapConfig::from_json_str(raw)?;
//! let reconciler = build_bootstrap_defaults(
//!     &cfg,
//!     Arc::new(registry),
//!     TokioSpawner::new(tokio::runtime::Handle::current()),
//! )?;
//! let summary = reconciler.bootstrap().await;
//! tracing::info!("bootstrap finished: {} live jobs", summary.live);
//! ```
//!
//! Full reconciliation scenarios live in `tests/bootstrap_reconcile_test.rs`.

#![deny(warnings)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core domain model, job registry, scheduler, and reconciliation engine.
pub mod core;
/// Configuration models for the bootstrap and backend selection.
pub mod config;
/// Builders to construct the bootstrap engine from configuration.
pub mod builders;
/// Infrastructure adapters for the config store, coordination tree, and cache.
pub mod infra;
/// Runtime adapters (tokio spawner).
pub mod runtime;
/// Shared utilities.
pub mod util;
