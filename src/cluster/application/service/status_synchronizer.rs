//! Keeps the cluster view in step with the store's status endpoint.

use crate::{
    cluster::application::service::status_source::ClusterStatusSource,
    core::domain::model::{cluster_view::ClusterView, outcome::RefreshOutcome},
};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Owns the cluster view and refreshes it from a [`ClusterStatusSource`].
///
/// Every refresh takes a tag from a monotonic counter before its request is
/// sent. When the response arrives the view is replaced only if that tag is
/// still the latest one issued, so a slow response can never overwrite the
/// result of a refresh started after it. Failed refreshes leave the view as it
/// was.
pub struct StatusSynchronizer {
    source: Arc<dyn ClusterStatusSource>,
    view: RwLock<ClusterView>,
    issued: AtomicU64,
}

impl StatusSynchronizer {
    pub fn new(source: Arc<dyn ClusterStatusSource>) -> Self {
        Self {
            source,
            view: RwLock::new(ClusterView::default()),
            issued: AtomicU64::new(0),
        }
    }

    /// Fetches the cluster status and replaces the view with it.
    ///
    /// Never fails from the caller's point of view; the returned outcome is
    /// informational and the same information is logged.
    pub async fn refresh(&self) -> RefreshOutcome {
        let tag = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(tag, "refreshing cluster status");

        let response = match self.source.fetch_status().await {
            Ok(response) => response,
            Err(error) => {
                warn!(tag, error = %error, "Error fetching node status");
                return RefreshOutcome::Failed(error);
            }
        };

        let mut view = self.view.write().await;
        let latest = self.issued.load(Ordering::SeqCst);
        if tag != latest {
            debug!(tag, latest, "discarding superseded status response");
            return RefreshOutcome::Superseded { tag, latest };
        }

        let nodes = response.nodes.len();
        view.replace(tag, response.nodes);
        info!(tag, nodes, "cluster view replaced");
        RefreshOutcome::Applied { tag, nodes }
    }

    /// Returns a snapshot of the current view.
    pub async fn view(&self) -> ClusterView {
        self.view.read().await.clone()
    }

    /// Returns the current view rendered as `<id>: <status>` lines.
    pub async fn rendered(&self) -> Vec<String> {
        self.view.read().await.lines()
    }

    /// Tag of the most recently issued refresh, `0` if none was issued.
    pub fn latest_tag(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }

    /// Refreshes the view every `every` until the returned task is aborted.
    ///
    /// The first refresh happens one period after the call.
    pub fn spawn_polling(self: &Arc<Self>, every: Duration) -> JoinHandle<()> {
        let synchronizer = Arc::clone(self);
        tokio::spawn(async move {
            let mut interval = time::interval(every);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                synchronizer.refresh().await;
            }
        })
    }
}
