//! Construction of the reconciler from configuration and backend factories.

use std::sync::Arc;

use crate::config::{
    BootstrapConfig, CacheBackendConfig, CoordinationBackendConfig, StoreBackendConfig,
};
use crate::core::event_log::{EventSink, InMemoryEventSink};
use crate::core::registry::JobRegistry;
use crate::core::run_state::RunState;
use crate::core::scheduler::{SchedulerFactory, Spawn, SpawnHandle};
use crate::core::{BootstrapError, Reconciler};
use crate::infra::cache::{InMemorySnapshotCache, RedisSnapshotCache, SnapshotCache};
use crate::infra::coordination::{
    CoordinationTree, InMemoryCoordinationTree, ZookeeperCoordinationTree,
};
use crate::infra::store::{ConfigStore, InMemoryConfigStore, PostgresConfigStore};

/// Build a reconciler from configuration using the provided backend
/// factories.
pub fn build_bootstrap<FS, FC, FK, FE>(
    cfg: &BootstrapConfig,
    registry: Arc<JobRegistry>,
    spawner: SpawnHandle,
    mut store_factory: FS,
    mut coordination_factory: FC,
    mut cache_factory: FK,
    mut event_factory: FE,
) -> Result<Reconciler, BootstrapError>
where
    FS: FnMut(&BootstrapConfig) -> Result<Arc<dyn ConfigStore>, BootstrapError>,
    FC: FnMut(&BootstrapConfig) -> Result<Arc<dyn CoordinationTree>, BootstrapError>,
    FK: FnMut(&BootstrapConfig) -> Result<Arc<dyn SnapshotCache>, BootstrapError>,
    FE: FnMut(&BootstrapConfig) -> Result<Arc<dyn EventSink>, BootstrapError>,
{
    cfg.validate().map_err(BootstrapError::Config)?;

    let store = store_factory(cfg)?;
    let coordination = coordination_factory(cfg)?;
    let cache = cache_factory(cfg)?;
    let events = event_factory(cfg)?;
    let run_state = Arc::new(RunState::new());
    let factory = SchedulerFactory::new(
        Arc::clone(&registry),
        Arc::clone(&coordination),
        cfg.namespace.clone(),
        spawner,
    );

    Ok(Reconciler::new(
        registry,
        store,
        coordination,
        cache,
        events,
        run_state,
        factory,
        cfg.default_cron.clone(),
    ))
}

/// Build a reconciler wiring each backend from its config enum.
pub fn build_bootstrap_defaults<S>(
    cfg: &BootstrapConfig,
    registry: Arc<JobRegistry>,
    spawner: S,
) -> Result<Reconciler, BootstrapError>
where
    S: Spawn + Send + Sync + 'static,
{
    build_bootstrap(
        cfg,
        registry,
        SpawnHandle::new(spawner),
        |c| {
            Ok(match c.store {
                StoreBackendConfig::InMemory => {
                    Arc::new(InMemoryConfigStore::new()) as Arc<dyn ConfigStore>
                }
                StoreBackendConfig::Postgres => Arc::new(PostgresConfigStore),
            })
        },
        |c| {
            Ok(match c.coordination {
                CoordinationBackendConfig::InMemory => {
                    Arc::new(InMemoryCoordinationTree::new()) as Arc<dyn CoordinationTree>
                }
                CoordinationBackendConfig::Zookeeper => {
                    Arc::new(ZookeeperCoordinationTree::new(c.namespace.clone()))
                }
            })
        },
        |c| {
            Ok(match c.cache {
                CacheBackendConfig::InMemory => {
                    Arc::new(InMemorySnapshotCache::new()) as Arc<dyn SnapshotCache>
                }
                CacheBackendConfig::Redis => Arc::new(RedisSnapshotCache),
            })
        },
        |_| Ok(Arc::new(InMemoryEventSink::new(1024)) as Arc<dyn EventSink>),
    )
}
