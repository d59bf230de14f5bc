//! Named files and folders on top of [`ObjectStore`]
//!
//! Every artifact is addressed by name within a folder. Writes locate the
//! existing object and overwrite it, creating it only when absent. The
//! locate-then-write sequence is not atomic.

use std::sync::Arc;

use punchcard_domain::constants::{CSV_MIME_TYPE, FOLDER_MIME_TYPE};
use punchcard_domain::{NewObject, PunchcardError, Query, Result, StoredObject};
use tracing::debug;

use super::ports::ObjectStore;

/// Name-addressed view of the object store.
#[derive(Clone)]
pub struct RemoteFiles {
    store: Arc<dyn ObjectStore>,
}

impl RemoteFiles {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    /// First live file called `name` in `folder_id`.
    pub async fn find(
        &self,
        access_token: &str,
        folder_id: &str,
        name: &str,
    ) -> Result<Option<StoredObject>> {
        let query = Query::new().name_is(name).in_folder(folder_id).not_trashed();
        let mut found = self.store.list(access_token, &query).await?;
        if found.len() > 1 {
            debug!(name, count = found.len(), "multiple objects share a name; using the first");
        }
        Ok(if found.is_empty() { None } else { Some(found.swap_remove(0)) })
    }

    /// Content of `name` in `folder_id` as UTF-8 text, `None` when absent.
    pub async fn read_text(
        &self,
        access_token: &str,
        folder_id: &str,
        name: &str,
    ) -> Result<Option<String>> {
        let Some(object) = self.find(access_token, folder_id, name).await? else {
            return Ok(None);
        };
        let bytes = self.store.download(access_token, &object.id).await?;
        String::from_utf8(bytes).map(Some).map_err(|_| {
            PunchcardError::Storage(format!("{name} is not valid UTF-8"))
        })
    }

    /// Overwrite `name` in `folder_id`, creating it when absent. Returns the
    /// object id.
    pub async fn write_text(
        &self,
        access_token: &str,
        folder_id: &str,
        name: &str,
        content: &str,
    ) -> Result<String> {
        match self.find(access_token, folder_id, name).await? {
            Some(existing) => {
                self.store.update(access_token, &existing.id, content.as_bytes()).await?;
                debug!(name, id = %existing.id, "overwrote remote file");
                Ok(existing.id)
            }
            None => {
                let metadata = NewObject::new(name, CSV_MIME_TYPE).in_folder(folder_id);
                let id =
                    self.store.create(access_token, &metadata, Some(content.as_bytes())).await?;
                debug!(name, %id, "created remote file");
                Ok(id)
            }
        }
    }

    /// Id of the live folder called `name`, creating it when absent.
    pub async fn ensure_folder(&self, access_token: &str, name: &str) -> Result<String> {
        let query = Query::new().name_is(name).mime_type_is(FOLDER_MIME_TYPE).not_trashed();
        if let Some(folder) = self.store.list(access_token, &query).await?.into_iter().next() {
            return Ok(folder.id);
        }

        let id = self
            .store
            .create(access_token, &NewObject::new(name, FOLDER_MIME_TYPE), None)
            .await?;
        debug!(name, %id, "created folder");
        Ok(id)
    }
}
