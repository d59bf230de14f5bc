//! Error log appended to a CSV file in the object store

use std::sync::Arc;

use async_trait::async_trait;
use chrono_tz::Tz;
use punchcard_common::time::{format_civil, Clock};
use punchcard_common::CsvTable;
use punchcard_domain::constants::{ERROR_LOG_FILE, ERROR_LOG_HEADER};
use tracing::{error, warn};

use super::ports::ErrorReporter;
use crate::storage::RemoteFiles;

/// Appends `timestamp,message` rows to `エラーLOG.csv`.
pub struct RemoteErrorLog {
    files: RemoteFiles,
    clock: Arc<dyn Clock>,
    timezone: Tz,
}

impl RemoteErrorLog {
    pub fn new(files: RemoteFiles, clock: Arc<dyn Clock>, timezone: Tz) -> Self {
        Self { files, clock, timezone }
    }

    async fn append(&self, row: [String; 2], access_token: &str, folder_id: &str) -> Result<(), String> {
        let existing = self
            .files
            .read_text(access_token, folder_id, ERROR_LOG_FILE)
            .await
            .map_err(|e| e.to_string())?;

        let mut table = match existing {
            Some(text) => CsvTable::parse(&text).map_err(|e| format!("existing log unreadable: {e}"))?,
            None => CsvTable::new(ERROR_LOG_HEADER),
        };
        table.push_row(row).map_err(|e| e.to_string())?;

        self.files
            .write_text(access_token, folder_id, ERROR_LOG_FILE, &table.to_csv_string())
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}

/// Collapse a message onto one line and swap the field delimiter for `、`.
#[must_use]
pub fn sanitize(message: &str) -> String {
    message.replace("\r\n", " ").replace(['\n', '\r'], " ").replace(',', "、")
}

#[async_trait]
impl ErrorReporter for RemoteErrorLog {
    async fn report(&self, message: &str, access_token: &str, folder_id: &str) {
        warn!(message, "reporting failure to remote log");

        let timestamp = format_civil(&self.clock.now_in(self.timezone));
        let row = [timestamp, sanitize(message)];

        if let Err(reason) = self.append(row, access_token, folder_id).await {
            error!(%reason, folder_id, "failed to append to remote error log");
        }
    }
}
