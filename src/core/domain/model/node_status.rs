//! Domain model for the node entries of the `/status` endpoint.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A member of the store's cluster as reported by the status endpoint.
///
/// Both fields are opaque: the client neither interprets nor normalizes them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NodeStatus {
    /// Node identifier (e.g., "node1").
    pub id: String,
    /// Status label supplied by the server (e.g., "up", "down").
    pub status: String,
}

impl NodeStatus {
    pub fn new(id: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: status.into(),
        }
    }
}

/// Renders the entry the way the node list shows it: `<id>: <status>`.
impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.status)
    }
}
