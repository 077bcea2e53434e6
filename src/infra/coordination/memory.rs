//! In-memory coordination tree for development and testing.

use std::collections::BTreeSet;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::core::BootstrapError;
use crate::infra::coordination::CoordinationTree;

/// In-memory coordination tree: a flat, sorted set of node names under the
/// namespace root.
#[derive(Default)]
pub struct InMemoryCoordinationTree {
    nodes: Mutex<BTreeSet<String>>,
}

impl InMemoryCoordinationTree {
    /// Empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the tree with pre-existing nodes. Test setup helper.
    pub fn seed(&self, nodes: impl IntoIterator<Item = String>) {
        self.nodes.lock().extend(nodes);
    }

    /// Whether a node exists.
    #[must_use]
    pub fn contains(&self, node: &str) -> bool {
        self.nodes.lock().contains(node)
    }
}

#[async_trait]
impl CoordinationTree for InMemoryCoordinationTree {
    async fn list_children(&self, _path: &str) -> Result<Vec<String>, BootstrapError> {
        Ok(self.nodes.lock().iter().cloned().collect())
    }

    async fn create_node(&self, node: &str) -> Result<(), BootstrapError> {
        self.nodes.lock().insert(node.to_owned());
        Ok(())
    }

    async fn delete_node(&self, node: &str) -> Result<(), BootstrapError> {
        self.nodes.lock().remove(node);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_list_delete_round_trip() {
        let tree = InMemoryCoordinationTree::new();
        tree.create_node("ns.a").await.unwrap();
        tree.create_node("ns.b").await.unwrap();
        assert_eq!(
            tree.list_children("/").await.unwrap(),
            vec!["ns.a".to_owned(), "ns.b".to_owned()]
        );
        tree.delete_node("ns.a").await.unwrap();
        assert!(!tree.contains("ns.a"));
    }

    #[tokio::test]
    async fn delete_missing_node_is_a_no_op() {
        let tree = InMemoryCoordinationTree::new();
        assert!(tree.delete_node("ns.ghost").await.is_ok());
    }

    #[tokio::test]
    async fn create_existing_node_is_a_no_op() {
        let tree = InMemoryCoordinationTree::new();
        tree.create_node("ns.a").await.unwrap();
        tree.create_node("ns.a").await.unwrap();
        assert_eq!(tree.list_children("/").await.unwrap().len(), 1);
    }
}
