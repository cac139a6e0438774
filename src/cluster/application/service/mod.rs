pub mod status_source;
pub mod status_synchronizer;
