//! In-memory `ObjectStore`.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use punchcard_core::ObjectStore;
use punchcard_domain::constants::{CSV_MIME_TYPE, FOLDER_MIME_TYPE};
use punchcard_domain::{NewObject, PunchcardError, Query, Result, StoredObject};

#[derive(Default)]
struct State {
    objects: Vec<(StoredObject, Vec<u8>)>,
    next_id: usize,
    calls: usize,
    tokens_seen: Vec<String>,
    failure: Option<String>,
}

/// Object store backed by a vector, evaluating queries with
/// `Query::matches`.
#[derive(Clone, Default)]
pub struct InMemoryObjectStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&self, metadata: StoredObject, content: Vec<u8>) -> String {
        let mut state = self.state.lock();
        state.next_id += 1;
        let id = format!("obj-{}", state.next_id);
        state.objects.push((StoredObject { id: id.clone(), ..metadata }, content));
        id
    }

    /// Put a CSV file into `folder_id` without counting a call.
    pub fn seed_file(&self, folder_id: &str, name: &str, content: &str) -> String {
        self.insert(
            StoredObject {
                name: name.into(),
                mime_type: CSV_MIME_TYPE.into(),
                parents: vec![folder_id.into()],
                ..StoredObject::default()
            },
            content.as_bytes().to_vec(),
        )
    }

    pub fn seed_folder(&self, name: &str) -> String {
        self.insert(
            StoredObject {
                name: name.into(),
                mime_type: FOLDER_MIME_TYPE.into(),
                ..StoredObject::default()
            },
            Vec::new(),
        )
    }

    /// Mark an object as trashed.
    pub fn trash(&self, id: &str) {
        let mut state = self.state.lock();
        if let Some((object, _)) = state.objects.iter_mut().find(|(o, _)| o.id == id) {
            object.trashed = true;
        }
    }

    /// Text of the live file `name` in `folder_id`.
    pub fn content_of(&self, folder_id: &str, name: &str) -> Option<String> {
        let state = self.state.lock();
        state
            .objects
            .iter()
            .find(|(o, _)| !o.trashed && o.name == name && o.parents.iter().any(|p| p == folder_id))
            .map(|(_, bytes)| String::from_utf8_lossy(bytes).into_owned())
    }

    /// Number of live objects called `name`, in any folder.
    pub fn count_named(&self, name: &str) -> usize {
        self.state.lock().objects.iter().filter(|(o, _)| !o.trashed && o.name == name).count()
    }

    pub fn folders_named(&self, name: &str) -> Vec<String> {
        self.state
            .lock()
            .objects
            .iter()
            .filter(|(o, _)| o.name == name && o.mime_type == FOLDER_MIME_TYPE)
            .map(|(o, _)| o.id.clone())
            .collect()
    }

    /// Port calls made so far.
    pub fn calls(&self) -> usize {
        self.state.lock().calls
    }

    pub fn tokens_seen(&self) -> Vec<String> {
        self.state.lock().tokens_seen.clone()
    }

    /// Make every subsequent call fail with `PunchcardError::Network`.
    pub fn fail_with(&self, message: &str) {
        self.state.lock().failure = Some(message.to_string());
    }

    fn enter(&self, access_token: &str) -> Result<()> {
        let mut state = self.state.lock();
        state.calls += 1;
        state.tokens_seen.push(access_token.to_string());
        match &state.failure {
            Some(message) => Err(PunchcardError::Network(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn list(&self, access_token: &str, query: &Query) -> Result<Vec<StoredObject>> {
        self.enter(access_token)?;
        Ok(self
            .state
            .lock()
            .objects
            .iter()
            .filter(|(o, _)| query.matches(o))
            .map(|(o, _)| o.clone())
            .collect())
    }

    async fn create(
        &self,
        access_token: &str,
        metadata: &NewObject,
        content: Option<&[u8]>,
    ) -> Result<String> {
        self.enter(access_token)?;
        Ok(self.insert(
            StoredObject {
                name: metadata.name.clone(),
                mime_type: metadata.mime_type.clone(),
                parents: metadata.parents.clone(),
                ..StoredObject::default()
            },
            content.map(<[u8]>::to_vec).unwrap_or_default(),
        ))
    }

    async fn update(&self, access_token: &str, id: &str, content: &[u8]) -> Result<()> {
        self.enter(access_token)?;
        let mut state = self.state.lock();
        let (_, bytes) = state
            .objects
            .iter_mut()
            .find(|(o, _)| o.id == id)
            .ok_or_else(|| PunchcardError::NotFound(id.to_string()))?;
        *bytes = content.to_vec();
        Ok(())
    }

    async fn download(&self, access_token: &str, id: &str) -> Result<Vec<u8>> {
        self.enter(access_token)?;
        self.state
            .lock()
            .objects
            .iter()
            .find(|(o, _)| o.id == id)
            .map(|(_, bytes)| bytes.clone())
            .ok_or_else(|| PunchcardError::NotFound(id.to_string()))
    }
}
