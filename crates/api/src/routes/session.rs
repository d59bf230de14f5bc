//! Session resolution on page load and on the OAuth redirect

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Query, State};
use axum::Json;
use punchcard_domain::SessionState;
use serde::{Deserialize, Serialize};

use crate::utils::logging::log_route_outcome;
use crate::AppContext;

/// Query string of the provider redirect.
#[derive(Debug, Default, Deserialize)]
pub struct RedirectParams {
    pub code: Option<String>,
}

/// What the punch screen needs to render.
#[derive(Debug, Serialize)]
pub struct SessionStatus {
    pub state: SessionState,
    pub authenticated: bool,
    pub staff: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_url: Option<String>,
}

/// Resolve the session, exchanging `?code=` when the redirect carries one.
pub async fn status(
    State(context): State<Arc<AppContext>>,
    Query(params): Query<RedirectParams>,
) -> Json<SessionStatus> {
    let started = Instant::now();
    let resolution = {
        let mut session = context.session.lock().await;
        context.session_manager.resolve_session(&mut session, params.code.as_deref()).await
    };
    log_route_outcome("session::status", started.elapsed(), resolution.is_valid());

    Json(SessionStatus {
        state: resolution.state,
        authenticated: resolution.is_valid(),
        staff: context.staff().to_vec(),
        login_url: resolution.login_url,
    })
}
