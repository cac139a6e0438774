//! Single-key operations against the store.

use crate::{
    cluster::application::service::status_synchronizer::StatusSynchronizer,
    core::{
        domain::{
            error::KvError,
            model::{
                key_value::GetResponse,
                outcome::{DeleteOutcome, GetOutcome, SetOutcome},
            },
            value_object::StoreKey,
        },
        infrastructure::api_client::ApiClient,
    },
    kv::application::request::key_request::SetRequest,
};
use std::sync::Arc;
use tracing::{error, info, warn};

pub const SET_PATH: &str = "/set";
pub const GET_PATH: &str = "/get";
pub const DELETE_PATH: &str = "/delete";
const KEY_PARAM: &str = "key";

/// Issues `set`, `get` and `delete` requests.
///
/// Each call is one independent request/response exchange; overlapping calls
/// are neither queued nor serialized. A successful mutation is followed by
/// exactly one status refresh, awaited before the call returns. Failures are
/// logged and returned as outcomes, never retried.
pub struct KeyValueOperationClient {
    api_client: Arc<ApiClient>,
    synchronizer: Arc<StatusSynchronizer>,
}

impl KeyValueOperationClient {
    pub fn new(api_client: Arc<ApiClient>, synchronizer: Arc<StatusSynchronizer>) -> Self {
        Self {
            api_client,
            synchronizer,
        }
    }

    /// Writes `value` under `key`, then refreshes the cluster view.
    pub async fn set(&self, key: &str, value: &str) -> SetOutcome {
        let request = match SetRequest::new(key, value) {
            Ok(request) => request,
            Err(error) => {
                warn!(error = %error, "set rejected before sending");
                return SetOutcome::Failed(error.into());
            }
        };

        let url = self.api_client.base_url().endpoint(SET_PATH);
        match self.api_client.post_json(url, &request.into_body()).await {
            Ok(()) => {
                info!(key, "Key-value pair set successfully");
                let refresh = self.synchronizer.refresh().await;
                SetOutcome::Stored { refresh }
            }
            Err(error) => {
                log_failure("set", key, &error);
                SetOutcome::Failed(error)
            }
        }
    }

    /// Reads the value stored under `key`.
    ///
    /// A missing and an empty value both yield [`GetOutcome::NotFound`].
    pub async fn get(&self, key: &str) -> GetOutcome {
        let key = match StoreKey::new(key) {
            Ok(key) => key,
            Err(error) => {
                warn!(error = %error, "get rejected before sending");
                return GetOutcome::Failed(error.into());
            }
        };

        let url = self
            .api_client
            .base_url()
            .endpoint_with_query(GET_PATH, KEY_PARAM, key.as_str());
        match self.api_client.get_json::<GetResponse>(url).await {
            Ok(response) => match response.found_value() {
                Some(value) => {
                    info!(key = %key, value = %value, "Value for key \"{}\": {}", key, value);
                    GetOutcome::Found {
                        key: key.into_inner(),
                        value,
                    }
                }
                None => {
                    info!(key = %key, "Key \"{}\" not found", key);
                    GetOutcome::NotFound {
                        key: key.into_inner(),
                    }
                }
            },
            Err(error) => {
                log_failure("get", key.as_str(), &error);
                GetOutcome::Failed(error)
            }
        }
    }

    /// Deletes `key`, then refreshes the cluster view.
    pub async fn delete(&self, key: &str) -> DeleteOutcome {
        let key = match StoreKey::new(key) {
            Ok(key) => key,
            Err(error) => {
                warn!(error = %error, "delete rejected before sending");
                return DeleteOutcome::Failed(error.into());
            }
        };

        let url = self
            .api_client
            .base_url()
            .endpoint_with_query(DELETE_PATH, KEY_PARAM, key.as_str());
        match self.api_client.delete(url).await {
            Ok(()) => {
                info!(key = %key, "Key deleted successfully");
                let refresh = self.synchronizer.refresh().await;
                DeleteOutcome::Deleted { refresh }
            }
            Err(error) => {
                log_failure("delete", key.as_str(), &error);
                DeleteOutcome::Failed(error)
            }
        }
    }
}

fn log_failure(operation: &str, key: &str, error: &KvError) {
    match error {
        KvError::Protocol { status, .. } => {
            error!(operation, key, status, error = %error, "{} rejected by the store", operation)
        }
        _ => error!(operation, key, error = %error, "Error during {} for key \"{}\"", operation, key),
    }
}
