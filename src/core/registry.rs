//! Job registry: the static, built-at-`main` substitute for reflective bean
//! enumeration.
//!
//! The registry holds two things per job key: a declaration (kind plus
//! annotation-style metadata, what enumeration sees) and optionally a bound
//! executor (what lookup resolves). A declaration without an executor models
//! a wiring gap; the reconciler treats it as a per-job failure and moves on.

use std::collections::HashMap;
use std::sync::Arc;

use crate::core::executor::{DataflowJob, JobExecutor, SimpleJob};
use crate::core::job::{JobKey, JobKind, JobMeta};
use crate::core::BootstrapError;

/// Declaration of a job implementation present in the image.
#[derive(Debug, Clone)]
pub struct JobDeclaration {
    /// Base kind, selecting the executor contract.
    pub kind: JobKind,
    /// Annotation-style metadata, consulted when no row exists yet.
    pub meta: JobMeta,
}

/// Registry of every job implementation in the image. Built once before
/// bootstrap; read-only afterwards.
#[derive(Default)]
pub struct JobRegistry {
    declarations: HashMap<JobKey, JobDeclaration>,
    executors: HashMap<JobKey, JobExecutor>,
}

impl JobRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a simple job with its executor.
    pub fn register_simple(
        &mut self,
        key: impl Into<JobKey>,
        meta: JobMeta,
        job: Arc<dyn SimpleJob>,
    ) -> Result<(), BootstrapError> {
        let key = key.into();
        self.declare(key.clone(), JobKind::Simple, meta)?;
        self.executors.insert(key, JobExecutor::Simple(job));
        Ok(())
    }

    /// Register a dataflow job with its executor.
    pub fn register_dataflow(
        &mut self,
        key: impl Into<JobKey>,
        meta: JobMeta,
        job: Arc<dyn DataflowJob>,
    ) -> Result<(), BootstrapError> {
        let key = key.into();
        self.declare(key.clone(), JobKind::Dataflow, meta)?;
        self.executors.insert(key, JobExecutor::Dataflow(job));
        Ok(())
    }

    /// Declare a simple job without binding an executor. Lookup will miss
    /// until one is bound elsewhere.
    pub fn declare_simple(
        &mut self,
        key: impl Into<JobKey>,
        meta: JobMeta,
    ) -> Result<(), BootstrapError> {
        self.declare(key.into(), JobKind::Simple, meta)
    }

    /// Declare a dataflow job without binding an executor.
    pub fn declare_dataflow(
        &mut self,
        key: impl Into<JobKey>,
        meta: JobMeta,
    ) -> Result<(), BootstrapError> {
        self.declare(key.into(), JobKind::Dataflow, meta)
    }

    fn declare(
        &mut self,
        key: JobKey,
        kind: JobKind,
        meta: JobMeta,
    ) -> Result<(), BootstrapError> {
        if self.declarations.contains_key(&key) {
            return Err(BootstrapError::KeyCollision(key));
        }
        self.declarations.insert(key, JobDeclaration { kind, meta });
        Ok(())
    }

    /// Enumerate every declared job. Read once at bootstrap; the set does
    /// not change without a restart.
    #[must_use]
    pub fn enumerate(&self) -> Vec<(JobKey, JobDeclaration)> {
        self.declarations
            .iter()
            .map(|(k, d)| (k.clone(), d.clone()))
            .collect()
    }

    /// Resolve the executor bound to a job key, if any.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<JobExecutor> {
        self.executors.get(key).cloned()
    }

    /// Whether a job key is declared.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.declarations.contains_key(key)
    }

    /// Number of declared jobs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Whether no jobs are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::executor::ShardContext;
    use crate::core::AppResult;
    use async_trait::async_trait;

    struct Noop;

    #[async_trait]
    impl SimpleJob for Noop {
        async fn execute(&self, _ctx: &ShardContext) -> AppResult<()> {
            Ok(())
        }
    }

    #[test]
    fn register_then_lookup() {
        let mut reg = JobRegistry::new();
        reg.register_simple("a", JobMeta::new(), Arc::new(Noop)).unwrap();
        assert!(reg.lookup("a").is_some());
        assert!(reg.lookup("b").is_none());
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn collision_across_kinds_is_an_error() {
        let mut reg = JobRegistry::new();
        reg.register_simple("a", JobMeta::new(), Arc::new(Noop)).unwrap();
        let err = reg.declare_dataflow("a", JobMeta::new()).unwrap_err();
        assert!(matches!(err, BootstrapError::KeyCollision(k) if k == "a"));
    }

    #[test]
    fn duplicate_same_kind_is_an_error() {
        let mut reg = JobRegistry::new();
        reg.declare_simple("a", JobMeta::new()).unwrap();
        assert!(reg.declare_simple("a", JobMeta::new()).is_err());
    }

    #[test]
    fn declaration_without_executor_misses_lookup() {
        let mut reg = JobRegistry::new();
        reg.declare_simple("ghost", JobMeta::new()).unwrap();
        assert!(reg.contains("ghost"));
        assert!(reg.lookup("ghost").is_none());
    }
}
