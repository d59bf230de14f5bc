//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `PUNCHCARD_CLIENT_ID`: OAuth client ID (required)
//! - `PUNCHCARD_CLIENT_SECRET`: OAuth client secret (required)
//! - `PUNCHCARD_REDIRECT_URI`: Registered redirect URI (required)
//! - `PUNCHCARD_FOLDER_ID`: Drive folder for the token and timecards (required)
//! - `PUNCHCARD_TOKEN_URI`: Token endpoint (default: Google)
//! - `PUNCHCARD_ERROR_LOG_FOLDER_ID`: Drive folder for the error log
//! - `PUNCHCARD_TIMEZONE`: IANA civil timezone (default: `Asia/Tokyo`)
//! - `PUNCHCARD_BIND_ADDR`: Listen address (default: `127.0.0.1:8501`)
//! - `PUNCHCARD_STAFF`: Comma separated staff names
//! - `PUNCHCARD_HTTP_TIMEOUT_SECS`: Outbound request timeout (default: 30)
//!
//! ## File Locations
//! The loader searches the following paths (in order):
//! 1. `./punchcard.json` or `./punchcard.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. `../` and `../../` variants of the above
//! 4. Relative to executable location

use std::path::{Path, PathBuf};

use punchcard_domain::constants::{
    DEFAULT_BIND_ADDR, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_TIMEZONE, GOOGLE_AUTHORIZE_URL,
    GOOGLE_TOKEN_URL,
};
use punchcard_domain::{
    parse_timezone, Config, HttpConfig, OAuthSettings, PunchcardError, Result, ServerConfig,
    StorageConfig,
};

const CANDIDATE_NAMES: [&str; 4] = ["punchcard.json", "punchcard.toml", "config.json", "config.toml"];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `PunchcardError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<Config> {
    let config = match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            config
        }
        Err(e) => {
            tracing::debug!(error = %e, "Failed to load from environment, trying file");
            load_from_file(None)?
        }
    };

    config.civil_timezone()?;
    Ok(config)
}

/// Load configuration from environment variables
///
/// All required environment variables must be present. Returns an error
/// if any are missing.
///
/// # Errors
/// Returns `PunchcardError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<Config> {
    let client_id = env_var("PUNCHCARD_CLIENT_ID")?;
    let client_secret = env_var("PUNCHCARD_CLIENT_SECRET")?;
    let redirect_uri = env_var("PUNCHCARD_REDIRECT_URI")?;
    let folder_id = env_var("PUNCHCARD_FOLDER_ID")?;

    let token_uri = env_or("PUNCHCARD_TOKEN_URI", GOOGLE_TOKEN_URL);
    let error_log_folder_id = env_opt("PUNCHCARD_ERROR_LOG_FOLDER_ID");
    let timezone = env_or("PUNCHCARD_TIMEZONE", DEFAULT_TIMEZONE);
    parse_timezone(&timezone)?;

    let bind_addr = env_or("PUNCHCARD_BIND_ADDR", DEFAULT_BIND_ADDR);
    let staff = env_opt("PUNCHCARD_STAFF").map(|s| split_list(&s)).unwrap_or_default();
    let timeout_secs = match env_opt("PUNCHCARD_HTTP_TIMEOUT_SECS") {
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|e| PunchcardError::Config(format!("Invalid HTTP timeout: {e}")))?,
        None => DEFAULT_HTTP_TIMEOUT_SECS,
    };

    Ok(Config {
        oauth: OAuthSettings {
            client_id,
            client_secret,
            redirect_uri,
            token_uri,
            authorize_uri: GOOGLE_AUTHORIZE_URL.to_string(),
        },
        storage: StorageConfig { folder_id, error_log_folder_id },
        server: ServerConfig { bind_addr, staff },
        http: HttpConfig { timeout_secs },
        timezone,
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, searches multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `PunchcardError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(PunchcardError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => find_config_path().ok_or_else(|| {
            PunchcardError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| PunchcardError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| PunchcardError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| PunchcardError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(PunchcardError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn find_config_path() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.extend([cwd.clone(), cwd.join(".."), cwd.join("../..")]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.extend([exe_dir.to_path_buf(), exe_dir.join(".."), exe_dir.join("../..")]);
        }
    }

    roots
        .iter()
        .flat_map(|root| CANDIDATE_NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.exists())
}

/// Get required environment variable
///
/// # Errors
/// Returns `PunchcardError::Config` if the variable is not set or blank.
fn env_var(key: &str) -> Result<String> {
    env_opt(key).ok_or_else(|| {
        PunchcardError::Config(format!("Missing required environment variable: {key}"))
    })
}

/// Non-blank environment variable.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    env_opt(key).unwrap_or_else(|| default.to_string())
}

/// Split a comma separated list, dropping blanks.
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty()).map(String::from).collect()
}
