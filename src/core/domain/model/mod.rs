pub mod cluster_view;
pub mod key_value;
pub mod node_status;
pub mod outcome;
