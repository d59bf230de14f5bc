use std::time::Duration;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Install the global `fmt` subscriber, filtered by `RUST_LOG` (default
/// `info`).
///
/// Safe to call more than once; later calls leave the first subscriber in
/// place.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_target(true).try_init();
}

/// Log the outcome of a route with structured fields.
///
/// # Parameters
/// * `route` - Stable route identifier (e.g. `"punch::record"`).
/// * `elapsed` - Time spent handling the request.
/// * `success` - Whether the route produced its intended result.
///
/// Callers must avoid forwarding tokens or staff-entered text in `route`.
#[inline]
pub fn log_route_outcome(route: &str, elapsed: Duration, success: bool) {
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    if success {
        info!(route, duration_ms, "route_success");
    } else {
        warn!(route, duration_ms, "route_failure");
    }
}
