//! Application context - dependency injection container

use std::sync::Arc;
use std::time::Duration;

use chrono_tz::Tz;
use punchcard_common::auth::{OAuthClient, OAuthConfig, TokenExchanger};
use punchcard_common::time::{Clock, SystemClock};
use punchcard_core::{
    ErrorReporter, ObjectStore, PunchRecorder, RefreshTokenStore, RemoteErrorLog, RemoteFiles,
    SessionContext, SessionManager,
};
use punchcard_domain::{Config, PunchcardError, Result};
use punchcard_infra::{DriveObjectStore, HttpClient};
use tokio::sync::Mutex;
use tracing::info;

const USER_AGENT: &str = concat!("punchcard/", env!("CARGO_PKG_VERSION"));

/// Application context holding the services behind every route.
///
/// The per-process [`SessionContext`] sits behind an async mutex so that one
/// interaction at a time reads and replaces the session.
pub struct AppContext {
    pub config: Config,
    pub session_manager: SessionManager,
    pub punch_recorder: PunchRecorder,
    pub session: Mutex<SessionContext>,
}

impl AppContext {
    /// Wire the production adapters: Google's token endpoint and Drive.
    ///
    /// # Errors
    /// Returns `PunchcardError::Config` for an unknown timezone and
    /// `PunchcardError::Network` if the HTTP client cannot start.
    pub fn new(config: Config) -> Result<Self> {
        let timezone = config.civil_timezone()?;
        let timeout = Duration::from_secs(config.http.timeout_secs);

        let http = HttpClient::builder().timeout(timeout).user_agent(USER_AGENT).build()?;
        let store: Arc<dyn ObjectStore> = Arc::new(DriveObjectStore::new(http));
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let oauth_client = OAuthClient::new(timezone)
            .try_with_timeout(timeout)
            .map_err(|e| PunchcardError::Network(format!("token endpoint client: {e}")))?
            .with_clock(Arc::clone(&clock));
        let exchanger: Arc<dyn TokenExchanger> = Arc::new(oauth_client);

        info!(
            timezone = %timezone,
            timeout_secs = config.http.timeout_secs,
            folder_id = %config.storage.folder_id,
            "application context initialized"
        );

        Ok(Self::with_adapters(config, timezone, exchanger, store, clock))
    }

    /// Wire the services over caller-supplied adapters.
    pub fn with_adapters(
        config: Config,
        timezone: Tz,
        exchanger: Arc<dyn TokenExchanger>,
        store: Arc<dyn ObjectStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let files = RemoteFiles::new(store);
        let reporter: Arc<dyn ErrorReporter> =
            Arc::new(RemoteErrorLog::new(files.clone(), Arc::clone(&clock), timezone));
        let error_folder = config.storage.error_log_folder().to_string();
        let token_store = RefreshTokenStore::new(files.clone(), Arc::clone(&reporter))
            .with_error_log_folder(error_folder.clone());

        let session_manager = SessionManager::new(
            exchanger,
            token_store,
            Arc::clone(&reporter),
            Arc::clone(&clock),
            timezone,
            OAuthConfig::from(&config.oauth),
            config.storage.folder_id.clone(),
        )
        .with_error_log_folder(error_folder.clone());

        let punch_recorder = PunchRecorder::new(files, reporter, clock, timezone, error_folder);

        Self { config, session_manager, punch_recorder, session: Mutex::new(SessionContext::new()) }
    }

    /// Staff names offered on the punch screen.
    #[must_use]
    pub fn staff(&self) -> &[String] {
        &self.config.server.staff
    }
}
