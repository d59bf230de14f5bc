//! Configuration structures
//!
//! Loaded by `punchcard-infra::config` from the environment or from a JSON /
//! TOML file. Everything except the OAuth client and the storage folder has a
//! default.

use std::fmt;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BIND_ADDR, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_TIMEZONE, GOOGLE_AUTHORIZE_URL,
    GOOGLE_TOKEN_URL,
};
use crate::{PunchcardError, Result};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub oauth: OAuthSettings,
    pub storage: StorageConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub http: HttpConfig,
    /// IANA name of the civil timezone used for expiry checks and timestamps.
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Config {
    /// Resolve the configured civil timezone.
    ///
    /// # Errors
    /// Returns `PunchcardError::Config` if the name is not a known IANA zone.
    pub fn civil_timezone(&self) -> Result<Tz> {
        parse_timezone(&self.timezone)
    }
}

/// OAuth client registration with the identity provider
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthSettings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    #[serde(default = "default_authorize_uri")]
    pub authorize_uri: String,
}

impl fmt::Debug for OAuthSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthSettings")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri)
            .field("token_uri", &self.token_uri)
            .field("authorize_uri", &self.authorize_uri)
            .finish()
    }
}

/// Remote folders holding the refresh token, timecards and the error log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub folder_id: String,
    /// Folder for the error log. Falls back to `folder_id` when unset.
    #[serde(default)]
    pub error_log_folder_id: Option<String>,
}

impl StorageConfig {
    /// Folder that receives error log rows.
    #[must_use]
    pub fn error_log_folder(&self) -> &str {
        self.error_log_folder_id.as_deref().unwrap_or(&self.folder_id)
    }
}

/// HTTP surface settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Staff names offered by the punch screen.
    #[serde(default)]
    pub staff: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind_addr: default_bind_addr(), staff: Vec::new() }
    }
}

/// Outbound HTTP transport settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_http_timeout")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: default_http_timeout() }
    }
}

/// Parse an IANA timezone name.
///
/// # Errors
/// Returns `PunchcardError::Config` for unknown names.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|e| PunchcardError::Config(format!("Invalid timezone '{name}': {e}")))
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

fn default_token_uri() -> String {
    GOOGLE_TOKEN_URL.to_string()
}

fn default_authorize_uri() -> String {
    GOOGLE_AUTHORIZE_URL.to_string()
}

fn default_bind_addr() -> String {
    DEFAULT_BIND_ADDR.to_string()
}

const fn default_http_timeout() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECS
}
