//! OAuth 2.0 token endpoint client
//!
//! Handles the two grants the session logic needs:
//! - Authorization code exchange
//! - Refresh token exchange
//!
//! Requests are form-encoded POSTs. Responses are read as text first so the
//! raw body can travel with any error for diagnostics.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::TimeDelta;
use chrono_tz::Tz;
use punchcard_domain::constants::DEFAULT_HTTP_TIMEOUT_SECS;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, warn};

use super::traits::TokenExchanger;
use super::types::{OAuthConfig, RefreshedToken, TokenGrant, TokenResponse};
use crate::http::apply_proxy_policy;
use crate::time::{Clock, SystemClock};

/// Error type for token endpoint operations
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// Empty authorization code; nothing was sent
    #[error("authorization code is empty")]
    EmptyCode,

    /// Empty refresh token; nothing was sent
    #[error("refresh token is empty")]
    EmptyRefreshToken,

    /// HTTP request failed before a response arrived
    #[error("token endpoint request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Endpoint answered with a non-2xx status
    #[error("token endpoint returned HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    /// Response body was not a token response
    #[error("malformed token response ({reason}): {body}")]
    Malformed { reason: String, body: String },

    /// Response parsed but lacked a required field
    #[error("token response is missing `{field}`: {body}")]
    MissingField { field: &'static str, body: String },
}

impl ExchangeError {
    /// Raw response body, when one was received.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Rejected { body, .. }
            | Self::Malformed { body, .. }
            | Self::MissingField { body, .. } => Some(body),
            Self::EmptyCode | Self::EmptyRefreshToken | Self::Transport(_) => None,
        }
    }
}

/// OAuth 2.0 token endpoint client
///
/// Expiry instants are computed from the injected clock in the configured
/// civil timezone.
#[derive(Debug, Clone)]
pub struct OAuthClient {
    client: Client,
    clock: Arc<dyn Clock>,
    timezone: Tz,
}

impl OAuthClient {
    /// Create a client with the default 30 second request timeout.
    ///
    /// # Arguments
    /// * `timezone` - Civil timezone for computed expiry instants
    ///
    /// # Examples
    /// ```
    /// # #[cfg(feature = "platform")]
    /// # {
    /// use punchcard_common::auth::OAuthClient;
    ///
    /// let client = OAuthClient::new(chrono_tz::Asia::Tokyo);
    /// # let _ = client;
    /// # }
    /// ```
    #[must_use]
    pub fn new(timezone: Tz) -> Self {
        Self {
            client: build_http_client(Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS)),
            clock: Arc::new(SystemClock),
            timezone,
        }
    }

    /// Replace the request timeout.
    ///
    /// Falls back to reqwest's defaults, with a warning, if the client
    /// cannot be built; use [`try_with_timeout`](Self::try_with_timeout) to
    /// fail instead.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = build_http_client(timeout);
        self
    }

    /// Replace the request timeout, failing if the client cannot be built.
    ///
    /// # Errors
    /// Returns `ExchangeError::Transport` if the TLS backend cannot start.
    pub fn try_with_timeout(mut self, timeout: Duration) -> Result<Self, ExchangeError> {
        self.client = try_build_http_client(timeout)?;
        Ok(self)
    }

    /// Replace the clock used for expiry computation.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Civil timezone of computed expiry instants.
    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.timezone
    }

    async fn post_form(
        &self,
        config: &OAuthConfig,
        grant_type: &str,
        params: &[(&str, &str)],
    ) -> Result<(TokenResponse, String), ExchangeError> {
        let mut form = vec![
            ("grant_type", grant_type),
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
        ];
        form.extend_from_slice(params);

        let response = self.client.post(&config.token_url).form(&form).send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(grant_type, %status, "token endpoint responded");

        if !status.is_success() {
            warn!(grant_type, %status, "token endpoint rejected grant");
            return Err(ExchangeError::Rejected { status: status.as_u16(), body });
        }

        match serde_json::from_str::<TokenResponse>(&body) {
            Ok(parsed) => Ok((parsed, body)),
            Err(e) => Err(ExchangeError::Malformed { reason: e.to_string(), body }),
        }
    }
}

fn try_build_http_client(timeout: Duration) -> Result<Client, ExchangeError> {
    Ok(apply_proxy_policy(Client::builder().timeout(timeout)).build()?)
}

fn build_http_client(timeout: Duration) -> Client {
    try_build_http_client(timeout).unwrap_or_else(|e| {
        warn!(
            error = %e,
            timeout_secs = timeout.as_secs(),
            "token endpoint client could not be built; using reqwest defaults without the timeout"
        );
        Client::new()
    })
}

#[async_trait]
impl TokenExchanger for OAuthClient {
    async fn exchange_code(
        &self,
        code: &str,
        config: &OAuthConfig,
    ) -> Result<TokenGrant, ExchangeError> {
        if code.is_empty() {
            return Err(ExchangeError::EmptyCode);
        }

        let (response, body) = self
            .post_form(
                config,
                "authorization_code",
                &[("code", code), ("redirect_uri", config.redirect_uri.as_str())],
            )
            .await?;

        let access_token = response
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or(ExchangeError::MissingField { field: "access_token", body })?;

        Ok(TokenGrant {
            access_token,
            refresh_token: response.refresh_token.filter(|t| !t.is_empty()),
            expires_in: response.expires_in,
        })
    }

    async fn exchange_refresh_token(
        &self,
        refresh_token: &str,
        config: &OAuthConfig,
    ) -> Result<RefreshedToken, ExchangeError> {
        if refresh_token.is_empty() {
            return Err(ExchangeError::EmptyRefreshToken);
        }

        let (response, body) = self
            .post_form(config, "refresh_token", &[("refresh_token", refresh_token)])
            .await?;

        let Some(access_token) = response.access_token.filter(|t| !t.is_empty()) else {
            return Err(ExchangeError::MissingField { field: "access_token", body });
        };
        let Some(expires_in) = response.expires_in else {
            return Err(ExchangeError::MissingField { field: "expires_in", body });
        };

        let now = self.clock.now_in(self.timezone);
        let Some(expires_at) =
            TimeDelta::try_seconds(expires_in).and_then(|ttl| now.checked_add_signed(ttl))
        else {
            return Err(ExchangeError::Malformed {
                reason: format!("expires_in {expires_in} is out of range"),
                body,
            });
        };

        Ok(RefreshedToken {
            access_token,
            expires_at,
            refresh_token: response.refresh_token.filter(|t| !t.is_empty()),
        })
    }
}
