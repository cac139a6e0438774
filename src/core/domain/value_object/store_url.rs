use crate::core::domain::error::ValidationError;
use std::fmt;
use url::Url;

/// Longest base URL accepted (RFC 7230 practical limit).
const MAX_URL_LENGTH: usize = 2083;

const ALLOWED_SCHEMES: [&str; 2] = ["http", "https"];

/// A validated base URL of the key-value store's HTTP interface.
///
/// Endpoint paths are joined onto it with [`StoreUrl::endpoint`].
///
/// # Examples
///
/// ```
/// use kvstore_console::StoreUrl;
///
/// let url = StoreUrl::new("http://localhost:9090").unwrap();
/// assert_eq!(url.endpoint("/status").as_str(), "http://localhost:9090/status");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreUrl(Url);

impl StoreUrl {
    /// Parses and validates a base URL.
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let value = value.as_ref();
        validate_url(value)?;
        let url = Url::parse(value)
            .map_err(|e| ValidationError::Format(format!("Invalid URL format: {}", e)))?;
        Ok(Self(url))
    }

    /// Creates a URL without validation.
    #[cfg(test)]
    pub(crate) fn new_unchecked(value: &str) -> Self {
        Self(Url::parse(value).expect("test URL must parse"))
    }

    /// Builds the absolute URL of an endpoint below this base.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> Url {
        let mut url = self.0.clone();
        let base = url.path().trim_end_matches('/').to_string();
        url.set_path(&format!("{}/{}", base, path.trim_start_matches('/')));
        url.set_query(None);
        url
    }

    /// Builds the absolute URL of an endpoint with a single query parameter.
    ///
    /// The value is percent-encoded.
    #[must_use]
    pub fn endpoint_with_query(&self, path: &str, name: &str, value: &str) -> Url {
        let mut url = self.endpoint(path);
        url.query_pairs_mut().append_pair(name, value);
        url
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for StoreUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

/// Validates a store base URL.
pub(crate) fn validate_url(url: &str) -> Result<(), ValidationError> {
    if url.is_empty() {
        return Err(ValidationError::Field {
            field: "url".to_string(),
            message: "URL cannot be empty".to_string(),
        });
    }

    if url.len() > MAX_URL_LENGTH {
        return Err(ValidationError::Format(format!(
            "URL exceeds maximum length of {} characters",
            MAX_URL_LENGTH
        )));
    }

    let parsed = Url::parse(url)
        .map_err(|e| ValidationError::Format(format!("Invalid URL format: {}", e)))?;

    if !ALLOWED_SCHEMES.contains(&parsed.scheme()) {
        return Err(ValidationError::ConstraintViolation(format!(
            "Invalid scheme. Must be one of: {}",
            ALLOWED_SCHEMES.join(", ")
        )));
    }

    if parsed.host_str().is_none() {
        return Err(ValidationError::Field {
            field: "url".to_string(),
            message: "URL must contain a host".to_string(),
        });
    }

    Ok(())
}
