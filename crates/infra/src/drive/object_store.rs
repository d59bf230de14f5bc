//! Google Drive v3 adapter for the `ObjectStore` port
//!
//! | operation  | request                                                   |
//! |------------|-----------------------------------------------------------|
//! | `list`     | `GET  {api}/files?q=…&fields=files(…)`                    |
//! | `create`   | `POST {upload}/files?uploadType=multipart` (with content) |
//! |            | `POST {api}/files` (metadata only, e.g. folders)          |
//! | `update`   | `PATCH {upload}/files/{id}?uploadType=media`              |
//! | `download` | `GET  {api}/files/{id}?alt=media`                         |

use async_trait::async_trait;
use punchcard_core::ObjectStore;
use punchcard_domain::constants::{DRIVE_API_BASE, DRIVE_UPLOAD_BASE};
use punchcard_domain::{NewObject, PunchcardError, Query, Result, StoredObject};
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use serde::Deserialize;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::http::HttpClient;

const LIST_FIELDS: &str = "files(id,name,mimeType,parents,trashed)";

#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<StoredObject>,
}

#[derive(Debug, Deserialize)]
struct CreatedFile {
    id: String,
}

/// Drive-backed object store.
#[derive(Clone, Debug)]
pub struct DriveObjectStore {
    http: HttpClient,
    api_base: String,
    upload_base: String,
}

impl DriveObjectStore {
    pub fn new(http: HttpClient) -> Self {
        Self { http, api_base: DRIVE_API_BASE.to_string(), upload_base: DRIVE_UPLOAD_BASE.to_string() }
    }

    /// Point both endpoints somewhere else (a mock server in tests).
    #[must_use]
    pub fn with_base_urls(mut self, api_base: impl Into<String>, upload_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self.upload_base = upload_base.into().trim_end_matches('/').to_string();
        self
    }

    fn parse<T: for<'de> Deserialize<'de>>(bytes: &[u8], what: &str) -> Result<T> {
        serde_json::from_slice(bytes)
            .map_err(|e| PunchcardError::Storage(format!("unexpected Drive {what} response: {e}")))
    }
}

/// `multipart/related` body: JSON metadata part followed by the content part.
fn multipart_related(
    boundary: &str,
    metadata: &NewObject,
    content: &[u8],
) -> Result<Vec<u8>> {
    let metadata = serde_json::to_vec(metadata)
        .map_err(|e| PunchcardError::Internal(format!("cannot encode file metadata: {e}")))?;

    let mut body = Vec::with_capacity(metadata.len() + content.len() + 256);
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(b"Content-Type: application/json; charset=UTF-8\r\n\r\n");
    body.extend_from_slice(&metadata);
    body.extend_from_slice(format!("\r\n--{boundary}\r\n").as_bytes());
    body.extend_from_slice(b"Content-Type: text/csv; charset=UTF-8\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    Ok(body)
}

#[async_trait]
impl ObjectStore for DriveObjectStore {
    #[instrument(skip(self, access_token, query), fields(q = %query))]
    async fn list(&self, access_token: &str, query: &Query) -> Result<Vec<StoredObject>> {
        let request = self
            .http
            .request(Method::GET, format!("{}/files", self.api_base))
            .bearer_auth(access_token)
            .query(&[("q", query.render().as_str()), ("fields", LIST_FIELDS), ("spaces", "drive")]);

        let bytes = self.http.send_for_bytes(request).await?;
        let list: FileList = Self::parse(&bytes, "list")?;
        debug!(count = list.files.len(), "listed Drive files");
        Ok(list.files)
    }

    #[instrument(skip(self, access_token, metadata, content), fields(name = %metadata.name))]
    async fn create(
        &self,
        access_token: &str,
        metadata: &NewObject,
        content: Option<&[u8]>,
    ) -> Result<String> {
        let request = match content {
            Some(content) => {
                let boundary = format!("punchcard-{}", Uuid::new_v4().simple());
                let body = multipart_related(&boundary, metadata, content)?;
                self.http
                    .request(Method::POST, format!("{}/files", self.upload_base))
                    .bearer_auth(access_token)
                    .query(&[("uploadType", "multipart"), ("fields", "id")])
                    .header(CONTENT_TYPE, format!("multipart/related; boundary={boundary}"))
                    .body(body)
            }
            None => self
                .http
                .request(Method::POST, format!("{}/files", self.api_base))
                .bearer_auth(access_token)
                .query(&[("fields", "id")])
                .json(metadata),
        };

        let bytes = self.http.send_for_bytes(request).await?;
        let created: CreatedFile = Self::parse(&bytes, "create")?;
        Ok(created.id)
    }

    #[instrument(skip(self, access_token, content))]
    async fn update(&self, access_token: &str, id: &str, content: &[u8]) -> Result<()> {
        let request = self
            .http
            .request(Method::PATCH, format!("{}/files/{id}", self.upload_base))
            .bearer_auth(access_token)
            .query(&[("uploadType", "media")])
            .header(CONTENT_TYPE, "text/csv; charset=UTF-8")
            .body(content.to_vec());

        self.http.send_for_bytes(request).await?;
        Ok(())
    }

    #[instrument(skip(self, access_token))]
    async fn download(&self, access_token: &str, id: &str) -> Result<Vec<u8>> {
        let request = self
            .http
            .request(Method::GET, format!("{}/files/{id}", self.api_base))
            .bearer_auth(access_token)
            .query(&[("alt", "media")]);

        self.http.send_for_bytes(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multipart_body_layout() {
        let meta = NewObject::new("refresh_token.csv", "text/csv").in_folder("f1");
        let body = multipart_related("B", &meta, b"refresh_token\nUlQx").unwrap();
        let text = String::from_utf8(body).unwrap();

        assert!(text.starts_with("--B\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{"));
        assert!(text.contains(r#""parents":["f1"]"#));
        assert!(text.contains("\r\n--B\r\nContent-Type: text/csv; charset=UTF-8\r\n\r\nrefresh_token\nUlQx\r\n"));
        assert!(text.ends_with("--B--\r\n"));
    }
}
