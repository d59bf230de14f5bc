//! Traits for OAuth token endpoint operations
//!
//! The session logic depends on this trait rather than on the HTTP client so
//! it can be driven by scripted exchangers in tests.

use async_trait::async_trait;

use super::client::ExchangeError;
use super::types::{OAuthConfig, RefreshedToken, TokenGrant};

/// Stateless client for the provider's token endpoint.
///
/// Implementations never retry; the caller decides whether and when to try
/// again.
#[async_trait]
pub trait TokenExchanger: Send + Sync {
    /// Trade an authorization code for tokens (`grant_type=authorization_code`).
    ///
    /// # Arguments
    /// * `code` - Single-use authorization code from the redirect
    /// * `config` - Client credentials, redirect URI and token endpoint
    ///
    /// # Returns
    /// Access token, optional refresh token and optional lifetime
    ///
    /// # Errors
    /// Returns [`ExchangeError::EmptyCode`] without a network call when `code`
    /// is empty, otherwise transport, status or response-shape failures.
    async fn exchange_code(
        &self,
        code: &str,
        config: &OAuthConfig,
    ) -> Result<TokenGrant, ExchangeError>;

    /// Trade a refresh token for a new access token (`grant_type=refresh_token`).
    ///
    /// # Arguments
    /// * `refresh_token` - Stored refresh token
    /// * `config` - Client credentials and token endpoint
    ///
    /// # Returns
    /// Access token with its absolute expiry in the civil timezone, plus a
    /// rotated refresh token when the provider issued one
    ///
    /// # Errors
    /// Returns [`ExchangeError::MissingField`] when the response lacks
    /// `access_token` or `expires_in`, otherwise transport or status failures.
    async fn exchange_refresh_token(
        &self,
        refresh_token: &str,
        config: &OAuthConfig,
    ) -> Result<RefreshedToken, ExchangeError>;
}
