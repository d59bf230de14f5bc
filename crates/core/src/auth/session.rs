//! Session resolution
//!
//! ```text
//!            code (unseen)           ┌──────────────┐
//!   ───────────────────────────────► │ SessionValid │ ◄──┐
//!                                    └──────┬───────┘    │ refresh ok
//!                                           │ expires    │
//!   ┌───────────┐  no stored token   ┌──────▼─────────┐  │
//!   │ NoSession │ ◄───────────────── │ SessionExpired │ ─┘
//!   └───────────┘  or refresh fails  └────────────────┘
//! ```
//!
//! Resolution never fails. Every failure is reported and degrades to
//! `NoSession` with a login link.

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::TimeDelta;
use chrono_tz::Tz;
use punchcard_common::auth::{OAuthConfig, TokenExchanger};
use punchcard_common::time::Clock;
use punchcard_domain::constants::MAX_CONSUMED_CODES;
use punchcard_domain::{Session, SessionState};
use tracing::{debug, info, instrument, warn};

use super::token_store::RefreshTokenStore;
use crate::reporting::ErrorReporter;

/// Per-process session holder.
///
/// Remembers the most recent authorization codes it has exchanged so a
/// redirect that is replayed (a page reload keeps `?code=` in the URL) is
/// treated as a return visit instead of a second exchange.
#[derive(Debug, Default, Clone)]
pub struct SessionContext {
    session: Session,
    consumed_codes: VecDeque<String>,
}

impl SessionContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// `true` if `code` was already exchanged through this context.
    #[must_use]
    pub fn is_consumed(&self, code: &str) -> bool {
        self.consumed_codes.iter().any(|c| c == code)
    }

    fn mark_consumed(&mut self, code: &str) {
        if self.consumed_codes.len() == MAX_CONSUMED_CODES {
            self.consumed_codes.pop_front();
        }
        self.consumed_codes.push_back(code.to_string());
    }

    /// Classify the held session at `now`.
    #[must_use]
    pub fn state_at(&self, now: chrono::DateTime<Tz>) -> SessionState {
        if self.session.is_valid_at(now) {
            SessionState::SessionValid
        } else if self.session.expires_at.is_none() {
            SessionState::NoSession
        } else {
            SessionState::SessionExpired
        }
    }
}

/// Outcome of [`SessionManager::resolve_session`].
#[derive(Clone, PartialEq, Eq)]
pub struct SessionResolution {
    /// `SessionValid` or `NoSession`
    pub state: SessionState,
    /// State of the held session before any exchange or renewal
    pub observed: SessionState,
    /// Present iff `state` is `SessionValid`
    pub access_token: Option<String>,
    /// Present iff `state` is `NoSession`
    pub login_url: Option<String>,
}

impl SessionResolution {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.state == SessionState::SessionValid
    }
}

impl std::fmt::Debug for SessionResolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionResolution")
            .field("state", &self.state)
            .field("observed", &self.observed)
            .field("has_access_token", &self.access_token.is_some())
            .field("login_url", &self.login_url)
            .finish()
    }
}

/// Keeps a [`SessionContext`] holding a usable access token.
pub struct SessionManager {
    exchanger: Arc<dyn TokenExchanger>,
    token_store: RefreshTokenStore,
    reporter: Arc<dyn ErrorReporter>,
    clock: Arc<dyn Clock>,
    timezone: Tz,
    oauth: OAuthConfig,
    folder_id: String,
    error_log_folder_id: String,
}

impl SessionManager {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        exchanger: Arc<dyn TokenExchanger>,
        token_store: RefreshTokenStore,
        reporter: Arc<dyn ErrorReporter>,
        clock: Arc<dyn Clock>,
        timezone: Tz,
        oauth: OAuthConfig,
        folder_id: impl Into<String>,
    ) -> Self {
        let folder_id = folder_id.into();
        Self {
            exchanger,
            token_store,
            reporter,
            clock,
            timezone,
            oauth,
            error_log_folder_id: folder_id.clone(),
            folder_id,
        }
    }

    /// Send failure reports to a different folder than the token file.
    #[must_use]
    pub fn with_error_log_folder(mut self, folder_id: impl Into<String>) -> Self {
        self.error_log_folder_id = folder_id.into();
        self
    }

    /// Consent-screen link offered when no session can be established.
    #[must_use]
    pub fn login_url(&self) -> String {
        self.oauth.login_url()
    }

    /// Bring `context` to a valid session if at all possible.
    ///
    /// `inbound_code` is the `code` parameter of the OAuth redirect, if the
    /// request carried one.
    #[instrument(skip_all, fields(has_code = inbound_code.is_some()))]
    pub async fn resolve_session(
        &self,
        context: &mut SessionContext,
        inbound_code: Option<&str>,
    ) -> SessionResolution {
        let observed = context.state_at(self.now());

        match inbound_code.map(str::trim).filter(|c| !c.is_empty()) {
            Some(code) if context.is_consumed(code) => {
                debug!("authorization code already exchanged; treating as return visit");
            }
            Some(code) => {
                context.mark_consumed(code);
                if self.exchange_code(context, code).await {
                    return self.valid(context, observed);
                }
            }
            None => {}
        }

        if context.session.is_valid_at(self.now()) {
            return self.valid(context, observed);
        }

        if self.renew(context).await {
            return self.valid(context, observed);
        }

        info!("no usable session; login required");
        SessionResolution {
            state: SessionState::NoSession,
            observed,
            access_token: None,
            login_url: Some(self.login_url()),
        }
    }

    async fn exchange_code(&self, context: &mut SessionContext, code: &str) -> bool {
        let grant = match self.exchanger.exchange_code(code, &self.oauth).await {
            Ok(grant) => grant,
            Err(e) => {
                warn!(error = %e, "authorization code exchange failed");
                self.report(&format!("authorization code exchange failed: {e}"), context).await;
                return false;
            }
        };

        let now = self.now();
        let expires_at = match grant
            .expires_in
            .and_then(TimeDelta::try_seconds)
            .and_then(|ttl| now.checked_add_signed(ttl))
        {
            Some(expires_at) => expires_at,
            None => {
                debug!(
                    expires_in = ?grant.expires_in,
                    "no usable expires_in on code grant; session will renew on next use"
                );
                now
            }
        };
        context.session = Session::new(grant.access_token, expires_at);
        info!(%expires_at, "session established from authorization code");

        if let Some(refresh_token) = grant.refresh_token {
            self.token_store
                .save(&refresh_token, &context.session.access_token, &self.folder_id)
                .await;
        }
        true
    }

    async fn renew(&self, context: &mut SessionContext) -> bool {
        let bootstrap_token = context.session.access_token.clone();
        let Some(refresh_token) = self.token_store.load(&bootstrap_token, &self.folder_id).await
        else {
            return false;
        };

        match self.exchanger.exchange_refresh_token(&refresh_token, &self.oauth).await {
            Ok(refreshed) => {
                context.session = Session::new(refreshed.access_token, refreshed.expires_at);
                info!(expires_at = %refreshed.expires_at, "session renewed");
                if let Some(rotated) = refreshed.refresh_token.filter(|t| *t != refresh_token) {
                    self.token_store
                        .save(&rotated, &context.session.access_token, &self.folder_id)
                        .await;
                }
                true
            }
            Err(e) => {
                warn!(error = %e, "refresh token exchange failed");
                self.report(&format!("access token refresh failed: {e}"), context).await;
                false
            }
        }
    }

    async fn report(&self, message: &str, context: &SessionContext) {
        self.reporter
            .report(message, &context.session.access_token, &self.error_log_folder_id)
            .await;
    }

    fn valid(&self, context: &SessionContext, observed: SessionState) -> SessionResolution {
        SessionResolution {
            state: SessionState::SessionValid,
            observed,
            access_token: Some(context.session.access_token.clone()),
            login_url: None,
        }
    }

    fn now(&self) -> chrono::DateTime<Tz> {
        self.clock.now_in(self.timezone)
    }
}
