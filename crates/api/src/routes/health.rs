use axum::Json;
use serde::Serialize;

/// Liveness payload.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn check() -> Json<HealthStatus> {
    Json(HealthStatus { status: "ok", version: env!("CARGO_PKG_VERSION") })
}
