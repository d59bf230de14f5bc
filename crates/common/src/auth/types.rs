//! OAuth 2.0 types and structures
//!
//! Client registration, token endpoint payloads and the results handed back
//! to callers of [`TokenExchanger`](super::TokenExchanger).

use std::fmt;

use chrono::DateTime;
use chrono_tz::Tz;
use punchcard_domain::constants::{DRIVE_FILE_SCOPE, GOOGLE_AUTHORIZE_URL, GOOGLE_TOKEN_URL};
use punchcard_domain::OAuthSettings;
use serde::Deserialize;

/// OAuth client registration and provider endpoints
#[derive(Clone, PartialEq, Eq)]
pub struct OAuthConfig {
    /// OAuth client ID
    pub client_id: String,

    /// OAuth client secret (confidential web client)
    pub client_secret: String,

    /// Redirect URI registered with the provider
    pub redirect_uri: String,

    /// Token endpoint
    pub token_url: String,

    /// Consent-screen endpoint
    pub authorization_url: String,

    /// OAuth scopes to request
    pub scopes: Vec<String>,

    /// Provider-specific authorize parameters
    pub extra_authorize_params: Vec<(String, String)>,
}

impl OAuthConfig {
    /// Google settings with offline access and a forced consent prompt, so a
    /// refresh token is issued on every login.
    #[must_use]
    pub fn google(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            token_url: GOOGLE_TOKEN_URL.to_string(),
            authorization_url: GOOGLE_AUTHORIZE_URL.to_string(),
            scopes: vec![DRIVE_FILE_SCOPE.to_string()],
            extra_authorize_params: vec![
                ("access_type".to_string(), "offline".to_string()),
                ("prompt".to_string(), "consent".to_string()),
            ],
        }
    }

    /// Point token requests at a different endpoint.
    #[must_use]
    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    /// Point the login link at a different consent endpoint.
    #[must_use]
    pub fn with_authorization_url(mut self, authorization_url: impl Into<String>) -> Self {
        self.authorization_url = authorization_url.into();
        self
    }

    /// Get scopes as space-separated string
    #[must_use]
    pub fn scope_string(&self) -> String {
        self.scopes.join(" ")
    }

    /// Consent-screen link the user follows to grant access.
    ///
    /// The provider redirects back to `redirect_uri` with a `code` parameter.
    #[must_use]
    pub fn login_url(&self) -> String {
        let mut params = vec![
            ("response_type".to_string(), "code".to_string()),
            ("client_id".to_string(), self.client_id.clone()),
            ("redirect_uri".to_string(), self.redirect_uri.clone()),
            ("scope".to_string(), self.scope_string()),
        ];
        params.extend(self.extra_authorize_params.iter().cloned());

        let query_string = params
            .iter()
            .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", self.authorization_url, query_string)
    }
}

impl From<&OAuthSettings> for OAuthConfig {
    fn from(settings: &OAuthSettings) -> Self {
        Self::google(&settings.client_id, &settings.client_secret, &settings.redirect_uri)
            .with_token_url(&settings.token_uri)
            .with_authorization_url(&settings.authorize_uri)
    }
}

impl fmt::Debug for OAuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri)
            .field("token_url", &self.token_url)
            .field("authorization_url", &self.authorization_url)
            .field("scopes", &self.scopes)
            .finish_non_exhaustive()
    }
}

/// Raw token endpoint response (RFC 6749 §5.1).
///
/// Every field is optional here; the client decides which absences are
/// errors for the grant in question.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
    pub token_type: Option<String>,
    pub scope: Option<String>,
}

/// Tokens issued for an authorization code.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenGrant {
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// Lifetime in seconds, when the provider reports one.
    pub expires_in: Option<i64>,
}

/// Access token issued for a refresh token.
#[derive(Clone, PartialEq, Eq)]
pub struct RefreshedToken {
    pub access_token: String,
    pub expires_at: DateTime<Tz>,
    /// Present when the provider rotated the refresh token.
    pub refresh_token: Option<String>,
}

impl fmt::Debug for TokenGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenGrant")
            .field("has_refresh_token", &self.refresh_token.is_some())
            .field("expires_in", &self.expires_in)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for RefreshedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshedToken")
            .field("expires_at", &self.expires_at)
            .field("rotated", &self.refresh_token.is_some())
            .finish_non_exhaustive()
    }
}
