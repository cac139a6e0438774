mod cluster;
mod core;
mod kv;


pub use crate::cluster::application::{
    response::status_response::StatusResponse,
    service::{status_source::ClusterStatusSource, status_synchronizer::StatusSynchronizer},
};
pub use crate::core::{
    config::{ClientConfig, DEFAULT_BASE_URL, RateLimitConfig},
    domain::{
        error::{KvError, KvResult, ValidationError},
        model::{
            cluster_view::ClusterView,
            key_value::{GetResponse, KeyValuePair},
            node_status::NodeStatus,
            outcome::{DeleteOutcome, GetOutcome, RefreshOutcome, SetOutcome},
        },
        value_object::{StoreKey, StoreUrl},
    },
};
pub use crate::kv::application::service::key_value_client::KeyValueOperationClient;

use crate::core::infrastructure::api_client::ApiClient;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// A client for the control plane of a distributed key-value store
///
/// This client ties together:
/// - Cluster status synchronization (the node list view)
/// - Single-key operations (set, get, delete)
/// - Optional background status polling
///
/// # Examples
///
/// ```no_run
/// use kvstore_console::{KvConsole, KvResult};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> KvResult<()> {
///     let console = KvConsole::builder()
///         .base_url("http://localhost:9090")?
///         .build()?;
///
///     console.start().await;
///     console.set("a", "1").await;
///     for line in console.rendered().await {
///         println!("{line}");
///     }
///     Ok(())
/// }
/// ```
pub struct KvConsole {
    config: ClientConfig,
    synchronizer: Arc<StatusSynchronizer>,
    operations: Arc<KeyValueOperationClient>,
}

/// Builder for KvConsole configuration
#[derive(Debug, Default)]
pub struct KvConsoleBuilder {
    config: ClientConfig,
}

impl KvConsoleBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> KvResult<Self> {
        let base_url = base_url.into();
        StoreUrl::new(&base_url)?;
        self.config.base_url = base_url;
        Ok(self)
    }

    pub fn rate_limit(mut self, requests_per_second: u32, burst_size: u32) -> KvResult<Self> {
        let rate_limit = RateLimitConfig {
            requests_per_second,
            burst_size,
        };
        rate_limit.validate()?;
        self.config.rate_limit = Some(rate_limit);
        Ok(self)
    }

    pub fn poll_interval(mut self, every: Duration) -> Self {
        self.config.poll_interval = Some(every);
        self
    }

    /// Replaces everything configured so far.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> KvResult<KvConsole> {
        KvConsole::from_config(self.config)
    }
}

impl KvConsole {
    /// Creates a new builder for KvConsole configuration
    pub fn builder() -> KvConsoleBuilder {
        KvConsoleBuilder::default()
    }

    /// Wires the HTTP client, the status synchronizer and the key-value client.
    ///
    /// # Errors
    ///
    /// Returns `KvError::Validation` if the configuration is invalid and
    /// `KvError::Configuration` if the HTTP client cannot be built.
    pub fn from_config(config: ClientConfig) -> KvResult<Self> {
        config.validate()?;
        let base_url = StoreUrl::new(&config.base_url)?;
        let api_client = Arc::new(ApiClient::new(base_url, &config)?);
        let synchronizer = Arc::new(StatusSynchronizer::new(api_client.clone()));
        let operations = Arc::new(KeyValueOperationClient::new(
            api_client,
            synchronizer.clone(),
        ));

        Ok(Self {
            config,
            synchronizer,
            operations,
        })
    }

    /// Performs the initial status refresh.
    pub async fn start(&self) -> RefreshOutcome {
        self.synchronizer.refresh().await
    }

    /// Starts background polling if a poll interval is configured.
    pub fn spawn_polling(&self) -> Option<JoinHandle<()>> {
        self.config
            .poll_interval
            .map(|every| self.synchronizer.spawn_polling(every))
    }

    pub async fn refresh(&self) -> RefreshOutcome {
        self.synchronizer.refresh().await
    }

    pub async fn set(&self, key: &str, value: &str) -> SetOutcome {
        self.operations.set(key, value).await
    }

    pub async fn get(&self, key: &str) -> GetOutcome {
        self.operations.get(key).await
    }

    pub async fn delete(&self, key: &str) -> DeleteOutcome {
        self.operations.delete(key).await
    }

    /// Returns a snapshot of the cluster view.
    pub async fn view(&self) -> ClusterView {
        self.synchronizer.view().await
    }

    /// Returns the node list as `<id>: <status>` lines.
    pub async fn rendered(&self) -> Vec<String> {
        self.synchronizer.rendered().await
    }

    pub fn synchronizer(&self) -> &Arc<StatusSynchronizer> {
        &self.synchronizer
    }

    pub fn operations(&self) -> &Arc<KeyValueOperationClient> {
        &self.operations
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}
