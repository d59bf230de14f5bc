//! Refresh token persistence
//!
//! The refresh token lives in `refresh_token.csv` inside the configured
//! folder as a one-column CSV (`refresh_token` header, one data row). The
//! value is Base64 encoded. This only keeps the token from being readable
//! at a glance; the store's access control is what protects it.

use std::sync::Arc;

use punchcard_common::{obfuscate, reveal, CsvTable};
use punchcard_domain::constants::{REFRESH_TOKEN_FILE, REFRESH_TOKEN_HEADER};
use punchcard_domain::PunchcardError;
use thiserror::Error;
use tracing::{debug, info};

use crate::reporting::ErrorReporter;
use crate::storage::RemoteFiles;

/// Token store failures. An absent file is not one of them.
#[derive(Debug, Error)]
pub enum TokenStoreError {
    /// The file exists but does not hold a decodable token
    #[error("stored refresh token is malformed: {0}")]
    Malformed(String),

    /// The object store call itself failed
    #[error("refresh token store unavailable: {0}")]
    Store(#[from] PunchcardError),
}

/// Reads and writes the single stored refresh token.
#[derive(Clone)]
pub struct RefreshTokenStore {
    files: RemoteFiles,
    reporter: Arc<dyn ErrorReporter>,
    error_log_folder_id: Option<String>,
}

impl RefreshTokenStore {
    pub fn new(files: RemoteFiles, reporter: Arc<dyn ErrorReporter>) -> Self {
        Self { files, reporter, error_log_folder_id: None }
    }

    /// Report failures to this folder instead of the token's own folder.
    #[must_use]
    pub fn with_error_log_folder(mut self, folder_id: impl Into<String>) -> Self {
        self.error_log_folder_id = Some(folder_id.into());
        self
    }

    async fn report(&self, message: &str, access_token: &str, folder_id: &str) {
        let target = self.error_log_folder_id.as_deref().unwrap_or(folder_id);
        self.reporter.report(message, access_token, target).await;
    }

    /// Persist `refresh_token`, overwriting any stored value.
    ///
    /// Failures go to the error reporter; returns whether the write landed.
    pub async fn save(&self, refresh_token: &str, access_token: &str, folder_id: &str) -> bool {
        match self.try_save(refresh_token, access_token, folder_id).await {
            Ok(()) => true,
            Err(e) => {
                self.report(&format!("refresh token save failed: {e}"), access_token, folder_id).await;
                false
            }
        }
    }

    /// Stored refresh token, `None` when absent or unreadable.
    ///
    /// Failures go to the error reporter.
    pub async fn load(&self, access_token: &str, folder_id: &str) -> Option<String> {
        match self.try_load(access_token, folder_id).await {
            Ok(token) => token,
            Err(e) => {
                self.report(&format!("refresh token load failed: {e}"), access_token, folder_id).await;
                None
            }
        }
    }

    /// Fallible form of [`save`](Self::save).
    ///
    /// # Errors
    /// Returns `TokenStoreError::Store` if the object store call fails.
    pub async fn try_save(
        &self,
        refresh_token: &str,
        access_token: &str,
        folder_id: &str,
    ) -> Result<(), TokenStoreError> {
        let body = format!("{REFRESH_TOKEN_HEADER}\n{}", obfuscate(refresh_token));
        let id = self.files.write_text(access_token, folder_id, REFRESH_TOKEN_FILE, &body).await?;
        info!(%id, "refresh token stored");
        Ok(())
    }

    /// Fallible form of [`load`](Self::load).
    ///
    /// # Errors
    /// Returns `TokenStoreError::Malformed` if the file exists but has no
    /// decodable token, `TokenStoreError::Store` if the store call fails.
    pub async fn try_load(
        &self,
        access_token: &str,
        folder_id: &str,
    ) -> Result<Option<String>, TokenStoreError> {
        let Some(text) = self.files.read_text(access_token, folder_id, REFRESH_TOKEN_FILE).await?
        else {
            debug!("no stored refresh token");
            return Ok(None);
        };

        let table = CsvTable::parse(&text).map_err(|e| TokenStoreError::Malformed(e.to_string()))?;
        let encoded = table
            .first_value(REFRESH_TOKEN_HEADER)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| TokenStoreError::Malformed(format!("no `{REFRESH_TOKEN_HEADER}` value")))?;
        let token = reveal(encoded).map_err(|e| TokenStoreError::Malformed(e.to_string()))?;

        Ok(Some(token))
    }
}
