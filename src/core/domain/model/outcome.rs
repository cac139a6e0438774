//! Terminal outcomes of the client's one-shot operations.
//!
//! None of the operations return `Err`: failures are reported here and in the
//! log, and never propagate further.

use crate::core::domain::error::KvError;

/// Result of one status refresh.
#[derive(Debug)]
pub enum RefreshOutcome {
    /// The response was the latest issued and replaced the view.
    Applied { tag: u64, nodes: usize },
    /// A newer refresh was issued while this one was in flight; the view was
    /// left alone.
    Superseded { tag: u64, latest: u64 },
    /// The request failed; the previous view stays in place.
    Failed(KvError),
}

impl RefreshOutcome {
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, RefreshOutcome::Applied { .. })
    }
}

/// Result of a `set` operation.
#[derive(Debug)]
pub enum SetOutcome {
    /// The server accepted the write; a refresh was issued afterwards.
    Stored { refresh: RefreshOutcome },
    /// The write was rejected or never completed; no refresh was issued.
    Failed(KvError),
}

/// Result of a `get` operation.
#[derive(Debug)]
pub enum GetOutcome {
    Found { key: String, value: String },
    /// Successful response with a missing or empty value.
    NotFound { key: String },
    Failed(KvError),
}

impl GetOutcome {
    /// Returns the value when one was found.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            GetOutcome::Found { value, .. } => Some(value),
            _ => None,
        }
    }
}

/// Result of a `delete` operation.
#[derive(Debug)]
pub enum DeleteOutcome {
    /// The server accepted the delete; a refresh was issued afterwards.
    Deleted { refresh: RefreshOutcome },
    Failed(KvError),
}
