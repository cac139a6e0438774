use crate::core::domain::model::node_status::NodeStatus;
use serde::{Deserialize, Serialize};

/// Body of a successful `GET /status` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct StatusResponse {
    pub nodes: Vec<NodeStatus>,
}
