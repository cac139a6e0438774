//! Internal HTTP client for the store's interface.

use crate::core::{
    config::{ClientConfig, RateLimitConfig},
    domain::{
        error::{KvError, KvResult, ValidationError},
        value_object::StoreUrl,
    },
};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::{Client, Method, Response};
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Internal HTTP client that sends requests to the store and maps responses
/// onto [`KvError`].
///
/// It holds no session state and never retries: a transport failure becomes
/// `KvError::Transport`, a non-success status becomes `KvError::Protocol` and
/// an unreadable success body becomes `KvError::Decode`. No timeout is set, so
/// a hung request stays pending.
#[derive(Debug)]
pub struct ApiClient {
    http_client: Client,
    base_url: StoreUrl,
    rate_limiter: Option<Arc<DefaultDirectRateLimiter>>,
}

impl ApiClient {
    /// Creates a new `ApiClient`.
    ///
    /// # Errors
    /// Returns `KvError::Validation` for an unusable rate limit and
    /// `KvError::Configuration` if the HTTP client cannot be built.
    pub fn new(base_url: StoreUrl, config: &ClientConfig) -> KvResult<Self> {
        let http_client = Client::builder()
            .build()
            .map_err(|e| KvError::Configuration(e.to_string()))?;

        let rate_limiter = config
            .rate_limit
            .map(|rl| build_rate_limiter(&rl).map(Arc::new))
            .transpose()?;

        Ok(Self {
            http_client,
            base_url,
            rate_limiter,
        })
    }

    /// Returns the base URL requests are sent to.
    pub fn base_url(&self) -> &StoreUrl {
        &self.base_url
    }

    /// Performs a GET request and decodes the JSON body.
    pub async fn get_json<T>(&self, url: Url) -> KvResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self.send(Method::GET, url, None::<&()>).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| KvError::Decode(format!("Failed to parse response: {}", e)))
    }

    /// Performs a POST request with a JSON body. The response body is ignored.
    pub async fn post_json<B>(&self, url: Url, body: &B) -> KvResult<()>
    where
        B: serde::Serialize,
    {
        self.send(Method::POST, url, Some(body)).await?;
        Ok(())
    }

    /// Performs a DELETE request. The response body is ignored.
    pub async fn delete(&self, url: Url) -> KvResult<()> {
        self.send(Method::DELETE, url, None::<&()>).await?;
        Ok(())
    }

    /// Core request execution: rate limit, send, check the status.
    async fn send<B>(&self, method: Method, url: Url, body: Option<&B>) -> KvResult<Response>
    where
        B: serde::Serialize,
    {
        if let Some(limiter) = &self.rate_limiter {
            limiter.until_ready().await;
        }

        debug!(method = %method, url = %url, "sending request");
        let mut req_builder = self.http_client.request(method, url);

        // `json` also declares the payload's content type.
        if let Some(body) = body {
            req_builder = req_builder.json(body);
        }

        let response = req_builder
            .send()
            .await
            .map_err(|e| KvError::Transport(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown".to_string());
            return Err(KvError::Protocol {
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }

        Ok(response)
    }
}

fn build_rate_limiter(config: &RateLimitConfig) -> KvResult<DefaultDirectRateLimiter> {
    config.validate()?;
    let per_second = NonZeroU32::new(config.requests_per_second).ok_or_else(|| {
        ValidationError::ConstraintViolation("requests_per_second must be non-zero".to_string())
    })?;
    let burst = NonZeroU32::new(config.burst_size).ok_or_else(|| {
        ValidationError::ConstraintViolation("burst_size must be non-zero".to_string())
    })?;
    Ok(RateLimiter::direct(
        Quota::per_second(per_second).allow_burst(burst),
    ))
}
