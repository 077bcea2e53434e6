//! Configuration models for the bootstrap and backend selection.

pub mod bootstrap;

pub use bootstrap::{
    BootstrapConfig, CacheBackendConfig, CoordinationBackendConfig, StoreBackendConfig,
};
