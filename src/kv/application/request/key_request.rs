//! Validated inputs of the single-key operations.

use crate::core::domain::{
    error::ValidationError, model::key_value::KeyValuePair, value_object::StoreKey,
};

/// Input of a `set` submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetRequest {
    pub key: StoreKey,
    pub value: String,
}

impl SetRequest {
    /// Builds a request from raw form input. Only the key is checked.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            key: StoreKey::new(key)?,
            value: value.into(),
        })
    }

    /// Consumes the request into the wire body.
    #[must_use]
    pub fn into_body(self) -> KeyValuePair {
        KeyValuePair {
            key: self.key.into_inner(),
            value: self.value,
        }
    }
}
