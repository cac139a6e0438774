use thiserror::Error;

/// The main error type for key-value store client operations.
///
/// The variants follow the failure taxonomy of the store's HTTP interface:
/// a request that never completes, a request the server answers with a
/// non-success status, and a success whose body cannot be understood.
#[derive(Error, Debug)]
pub enum KvError {
    /// The request never reached the server or never returned from it
    ///
    /// # Fields
    /// * `0` - A description of the transport failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered with a non-success HTTP status
    ///
    /// # Fields
    /// * `status` - The HTTP status code returned by the server
    /// * `body` - The response body, if any could be read
    #[error("Protocol error ({status}): {body}")]
    Protocol { status: u16, body: String },

    /// The server answered successfully but the body could not be decoded
    ///
    /// # Fields
    /// * `0` - A description of the decoding failure
    #[error("Decode error: {0}")]
    Decode(String),

    /// Input or configuration was rejected before any request was sent
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The client could not be configured
    ///
    /// # Fields
    /// * `0` - A description of the configuration problem
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl KvError {
    /// Returns the HTTP status for protocol failures.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            KvError::Protocol { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Specialized error type for validation failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Represents a validation failure for a specific field
    ///
    /// # Fields
    /// * `field` - The name of the field that failed validation
    /// * `message` - A detailed message about why validation failed
    #[error("Field '{field}' validation failed: {message}")]
    Field { field: String, message: String },

    /// Represents format/syntax validation failures
    ///
    /// # Fields
    /// * `0` - Description of the format violation
    #[error("Format error: {0}")]
    Format(String),

    /// Represents violations of domain constraints
    ///
    /// # Fields
    /// * `0` - Description of the constraint violation
    #[error("Domain constraint violation: {0}")]
    ConstraintViolation(String),
}

/// Type alias for Results that may fail with a KvError
pub type KvResult<T> = Result<T, KvError>;
