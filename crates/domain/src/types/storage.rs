//! Remote object store metadata

use serde::{Deserialize, Serialize};

/// Metadata of an object as listed by the store.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredObject {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub parents: Vec<String>,
    #[serde(default)]
    pub trashed: bool,
}

/// Metadata for an object about to be created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewObject {
    pub name: String,
    pub mime_type: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub parents: Vec<String>,
}

impl NewObject {
    #[must_use]
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self { name: name.into(), mime_type: mime_type.into(), parents: Vec::new() }
    }

    #[must_use]
    pub fn in_folder(mut self, folder_id: impl Into<String>) -> Self {
        self.parents.push(folder_id.into());
        self
    }
}
