//! Port interface for failure reporting

use async_trait::async_trait;

/// Best-effort failure side channel.
///
/// Implementations must not fail or panic. Their own errors are logged
/// locally and swallowed.
#[async_trait]
pub trait ErrorReporter: Send + Sync {
    /// Record `message`, authenticating with `access_token` against the log
    /// kept in `folder_id`.
    async fn report(&self, message: &str, access_token: &str, folder_id: &str);
}
