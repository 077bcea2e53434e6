//! ZooKeeper-backed coordination tree (interface stubs).

use async_trait::async_trait;

use crate::core::BootstrapError;
use crate::infra::coordination::CoordinationTree;

/// ZooKeeper coordination adapter placeholder. Node layout: one child of the
/// deployment namespace per registered scheduler, named
/// `<prefix>.<jobKey>`.
pub struct ZookeeperCoordinationTree {
    namespace: String,
}

impl ZookeeperCoordinationTree {
    /// Create an adapter rooted at a deployment namespace.
    #[must_use]
    pub const fn new(namespace: String) -> Self {
        Self { namespace }
    }

    /// The deployment namespace this adapter is rooted at.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}

#[async_trait]
impl CoordinationTree for ZookeeperCoordinationTree {
    async fn list_children(&self, _path: &str) -> Result<Vec<String>, BootstrapError> {
        Err(BootstrapError::Coordination(
            "zookeeper tree not wired to a client".into(),
        ))
    }

    async fn create_node(&self, _node: &str) -> Result<(), BootstrapError> {
        Err(BootstrapError::Coordination(
            "zookeeper tree not wired to a client".into(),
        ))
    }

    async fn delete_node(&self, _node: &str) -> Result<(), BootstrapError> {
        Err(BootstrapError::Coordination(
            "zookeeper tree not wired to a client".into(),
        ))
    }
}
