//! Port interfaces for the remote object store
//!
//! These traits define the boundary between core business logic and the
//! document store adapter. Every call is authenticated with the caller's
//! bearer access token.

use async_trait::async_trait;
use punchcard_domain::{NewObject, Query, Result, StoredObject};

/// Remote document store (a Drive-like API)
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List objects matching `query`.
    async fn list(&self, access_token: &str, query: &Query) -> Result<Vec<StoredObject>>;

    /// Create an object, optionally with content, returning its id.
    async fn create(
        &self,
        access_token: &str,
        metadata: &NewObject,
        content: Option<&[u8]>,
    ) -> Result<String>;

    /// Replace the content of an existing object.
    async fn update(&self, access_token: &str, id: &str, content: &[u8]) -> Result<()>;

    /// Download the content of an object.
    async fn download(&self, access_token: &str, id: &str) -> Result<Vec<u8>>;
}
