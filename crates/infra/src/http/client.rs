use std::time::Duration;

use punchcard_common::http::apply_proxy_policy;
use punchcard_domain::constants::DEFAULT_HTTP_TIMEOUT_SECS;
use punchcard_domain::{PunchcardError, Result};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::{debug, warn};

use crate::errors::{status_error, InfraError};

/// HTTP client with built-in retry and timeout support.
///
/// Server errors and connection failures are retried with exponential
/// backoff, for idempotent methods only. A `POST` goes out exactly once so a
/// create whose reply was lost is never repeated. Client errors are returned
/// on the first attempt.
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: ReqwestClient,
    max_attempts: usize,
    base_backoff: Duration,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    ///
    /// # Errors
    /// Returns `PunchcardError::Network` if the TLS backend cannot start.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute the provided request builder with retry semantics.
    ///
    /// # Errors
    /// Returns a mapped transport error once retries are exhausted.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let attempts = self.max_attempts.max(1);

        for attempt in 0..attempts {
            let cloned_builder = builder.try_clone().ok_or_else(|| {
                PunchcardError::Internal(
                    "request body cannot be cloned; buffer the body to enable retries".into(),
                )
            })?;

            let request = cloned_builder.build().map_err(|err| PunchcardError::from(InfraError::from(err)))?;

            let method = request.method().clone();
            let path = request.url().path().to_string();
            let retryable = attempt + 1 < attempts && is_idempotent(&method);
            debug!(attempt = attempt + 1, %method, %path, "sending HTTP request");

            match self.client.execute(request).await {
                Ok(response) => {
                    let status = response.status();
                    debug!(attempt = attempt + 1, %method, %path, %status, "received HTTP response");

                    if status.is_server_error() && retryable {
                        self.sleep_with_backoff(attempt + 1).await;
                        continue;
                    }

                    return Ok(response);
                }
                Err(err) => {
                    debug!(attempt = attempt + 1, %method, %path, error = %err, "HTTP request failed");

                    if retryable && should_retry_error(&err) {
                        self.sleep_with_backoff(attempt + 1).await;
                        continue;
                    }

                    return Err(InfraError::from(err).into());
                }
            }
        }

        Err(PunchcardError::Internal("http client exhausted retries without producing a result".into()))
    }

    /// Send and read the whole body, mapping non-success statuses to domain
    /// errors that carry the response text.
    ///
    /// # Errors
    /// Transport failures as in [`send`](Self::send); non-2xx responses via
    /// [`status_error`].
    pub async fn send_for_bytes(&self, builder: RequestBuilder) -> Result<Vec<u8>> {
        let response = self.send(builder).await?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(|err| PunchcardError::from(InfraError::from(err)))?;

        if !status.is_success() {
            let body = String::from_utf8_lossy(&bytes);
            warn!(%status, "HTTP request rejected");
            return Err(status_error(status, &body));
        }

        Ok(bytes.to_vec())
    }

    fn backoff_delay(&self, retry_number: usize) -> Duration {
        let shift = retry_number.saturating_sub(1).min(8) as u32;
        let multiplier = 1u32 << shift;
        self.base_backoff.saturating_mul(multiplier)
    }

    async fn sleep_with_backoff(&self, retry_number: usize) {
        let delay = self.backoff_delay(retry_number);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    max_attempts: usize,
    base_backoff: Duration,
    user_agent: Option<String>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            max_attempts: 3,
            base_backoff: Duration::from_millis(200),
            user_agent: None,
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Configure the total number of attempts (initial try + retries).
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn base_backoff(mut self, backoff: Duration) -> Self {
        self.base_backoff = backoff;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// # Errors
    /// Returns `PunchcardError::Network` if the reqwest client cannot be built.
    pub fn build(self) -> Result<HttpClient> {
        let mut builder = apply_proxy_policy(ReqwestClient::builder().timeout(self.timeout));

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        let client = builder.build().map_err(|err| PunchcardError::from(InfraError::from(err)))?;

        Ok(HttpClient { client, max_attempts: self.max_attempts.max(1), base_backoff: self.base_backoff })
    }
}

/// Methods safe to repeat. Drive `PATCH` uploads replace the whole media
/// body, so repeating one leaves the same content.
fn is_idempotent(method: &Method) -> bool {
    [Method::GET, Method::HEAD, Method::PUT, Method::DELETE, Method::OPTIONS, Method::PATCH]
        .contains(method)
}

fn should_retry_error(err: &reqwest::Error) -> bool {
    if err.is_timeout() || err.is_request() {
        return true;
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        if err.is_connect() {
            return true;
        }
    }
    false
}
