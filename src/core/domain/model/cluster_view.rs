//! The client's snapshot of cluster membership.

use crate::core::domain::model::node_status::NodeStatus;

/// Snapshot of all known nodes as of the last applied status fetch.
///
/// A view is only ever replaced as a whole. `tag` is the sequence number of
/// the fetch that produced it, `0` before any fetch has been applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterView {
    nodes: Vec<NodeStatus>,
    tag: u64,
}

impl ClusterView {
    /// Discards the current entries and stores `nodes` in response order.
    pub(crate) fn replace(&mut self, tag: u64, nodes: Vec<NodeStatus>) {
        self.nodes = nodes;
        self.tag = tag;
    }

    #[must_use]
    pub fn nodes(&self) -> &[NodeStatus] {
        &self.nodes
    }

    /// Sequence tag of the fetch this view came from.
    #[must_use]
    pub fn tag(&self) -> u64 {
        self.tag
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Renders every entry as `<id>: <status>`, preserving server order.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.nodes.iter().map(ToString::to_string).collect()
    }
}
