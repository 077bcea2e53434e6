//! Coordination-tree backends.

pub mod memory;
pub mod zookeeper;

pub use memory::InMemoryCoordinationTree;
pub use zookeeper::ZookeeperCoordinationTree;

use async_trait::async_trait;

use crate::core::BootstrapError;

/// Abstraction over the hierarchical coordination namespace.
///
/// Children of the namespace root are named `<prefix>.<jobKey>`; the job key
/// is the segment after the final `.`. The adapter hides retry/backoff
/// against the coordination service; permanent failures surface as errors.
#[async_trait]
pub trait CoordinationTree: Send + Sync {
    /// List children of a path, in stable order.
    async fn list_children(&self, path: &str) -> Result<Vec<String>, BootstrapError>;

    /// Create a node. Creating a node that already exists is a no-op.
    async fn create_node(&self, node: &str) -> Result<(), BootstrapError>;

    /// Delete a node. Deleting a missing node is a no-op, not an error.
    async fn delete_node(&self, node: &str) -> Result<(), BootstrapError>;
}
