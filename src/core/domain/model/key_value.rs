//! Request and response bodies of the single-key endpoints.

use serde::{Deserialize, Serialize};

/// Body of a `POST /set` request. Built from user input and dropped once sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValuePair {
    pub key: String,
    pub value: String,
}

/// Body of a successful `GET /get` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct GetResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl GetResponse {
    /// Returns the value if present and non-empty.
    ///
    /// An absent value and an empty one are treated alike; telling them apart
    /// is up to the server contract.
    #[must_use]
    pub fn found_value(self) -> Option<String> {
        self.value.filter(|v| !v.is_empty())
    }
}
