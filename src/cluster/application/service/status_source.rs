use crate::{
    cluster::application::response::status_response::StatusResponse,
    core::{domain::error::KvResult, infrastructure::api_client::ApiClient},
};
use async_trait::async_trait;

/// Path of the cluster status endpoint.
pub const STATUS_PATH: &str = "/status";

/// Anything that can produce a cluster membership snapshot.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClusterStatusSource: Send + Sync {
    /// Fetches the current membership snapshot.
    async fn fetch_status(&self) -> KvResult<StatusResponse>;
}

#[async_trait]
impl ClusterStatusSource for ApiClient {
    async fn fetch_status(&self) -> KvResult<StatusResponse> {
        let url = self.base_url().endpoint(STATUS_PATH);
        self.get_json::<StatusResponse>(url).await
    }
}
