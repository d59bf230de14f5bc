//! Punch submission

use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::Json;
use punchcard_core::PunchTarget;
use punchcard_domain::{PunchMode, PunchReceipt, PunchcardError};
use serde::Deserialize;

use crate::errors::ApiError;
use crate::utils::logging::log_route_outcome;
use crate::AppContext;

#[derive(Debug, Deserialize)]
pub struct PunchRequest {
    /// Picked from the configured staff list or typed in directly.
    pub staff_name: String,
    pub mode: PunchMode,
    /// Write under a folder with this name instead of the configured folder.
    #[serde(default)]
    pub folder_name: Option<String>,
}

/// Record a punch for the current session.
///
/// The session lock is held until the row is written, so the token used for
/// the write is the one the resolution just produced.
pub async fn record(
    State(context): State<Arc<AppContext>>,
    Json(request): Json<PunchRequest>,
) -> Result<Json<PunchReceipt>, ApiError> {
    let started = Instant::now();
    let result = record_inner(&context, request).await;
    log_route_outcome(
        "punch::record",
        started.elapsed(),
        matches!(&result, Ok(receipt) if receipt.success),
    );
    result.map(Json)
}

async fn record_inner(context: &AppContext, request: PunchRequest) -> Result<PunchReceipt, ApiError> {
    let name = request.staff_name.trim();
    if name.is_empty() {
        return Err(PunchcardError::InvalidInput("staff name must not be empty".into()).into());
    }

    let mut session = context.session.lock().await;
    let resolution = context.session_manager.resolve_session(&mut session, None).await;
    let (true, Some(access_token)) = (resolution.is_valid(), resolution.access_token) else {
        return Err(ApiError::LoginRequired {
            login_url: resolution.login_url.unwrap_or_else(|| context.session_manager.login_url()),
        });
    };

    let target = match request.folder_name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => PunchTarget::FolderName(name.to_string()),
        None => PunchTarget::FolderId(context.config.storage.folder_id.clone()),
    };

    Ok(context.punch_recorder.record(&access_token, name, request.mode, &target).await)
}
