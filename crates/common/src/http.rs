//! Outbound HTTP settings shared by every client in the workspace

use reqwest::ClientBuilder;

/// Set to any value to bypass system proxies (local mock servers, tests).
pub const DISABLE_PROXY_ENV: &str = "PUNCHCARD_DISABLE_PROXY";

/// Whether `PUNCHCARD_DISABLE_PROXY` is set.
#[must_use]
pub fn proxy_disabled() -> bool {
    std::env::var_os(DISABLE_PROXY_ENV).is_some()
}

/// Honor system proxies unless [`DISABLE_PROXY_ENV`] is set.
#[must_use]
pub fn apply_proxy_policy(builder: ClientBuilder) -> ClientBuilder {
    if proxy_disabled() {
        builder.no_proxy()
    } else {
        builder
    }
}
