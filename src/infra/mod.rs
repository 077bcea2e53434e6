//! Infrastructure adapters for the config store, coordination tree, and
//! shared snapshot cache.

pub mod cache;
pub mod coordination;
pub mod store;

pub use cache::{InMemorySnapshotCache, SnapshotCache};
pub use coordination::{CoordinationTree, InMemoryCoordinationTree};
pub use store::{ConfigStore, InMemoryConfigStore};
