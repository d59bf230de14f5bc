//! Punch recording service - core business logic

use std::sync::Arc;

use chrono_tz::Tz;
use punchcard_common::time::{format_civil, Clock};
use punchcard_common::CsvTable;
use punchcard_domain::constants::{TIMECARD_FILE_SUFFIX, TIMECARD_HEADER};
use punchcard_domain::{PunchMode, PunchReceipt, PunchRecord, PunchcardError, Result};
use tracing::{error, info, instrument};

use crate::reporting::ErrorReporter;
use crate::storage::RemoteFiles;

/// Where a punch should be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PunchTarget {
    /// Folder id, used as is
    FolderId(String),
    /// Folder name, located or created before writing
    FolderName(String),
}

/// Appends punches to the yearly timecard.
///
/// Callers must hold an access token from a `SessionValid` resolution.
pub struct PunchRecorder {
    files: RemoteFiles,
    reporter: Arc<dyn ErrorReporter>,
    clock: Arc<dyn Clock>,
    timezone: Tz,
    error_log_folder_id: String,
}

impl PunchRecorder {
    pub fn new(
        files: RemoteFiles,
        reporter: Arc<dyn ErrorReporter>,
        clock: Arc<dyn Clock>,
        timezone: Tz,
        error_log_folder_id: impl Into<String>,
    ) -> Self {
        Self { files, reporter, clock, timezone, error_log_folder_id: error_log_folder_id.into() }
    }

    /// Record a punch stamped with the current civil time.
    ///
    /// Failures are reported and come back as `success: false`; the receipt
    /// still carries the timestamp and file name that were attempted.
    #[instrument(skip_all, fields(%mode))]
    pub async fn record(
        &self,
        access_token: &str,
        staff_name: &str,
        mode: PunchMode,
        target: &PunchTarget,
    ) -> PunchReceipt {
        let now = self.clock.now_in(self.timezone);
        let record = match PunchRecord::new(staff_name, mode, now) {
            Ok(record) => record,
            Err(e) => {
                self.reporter.report(&e.to_string(), access_token, &self.error_log_folder_id).await;
                return PunchReceipt {
                    timestamp: format_civil(&now),
                    success: false,
                    filename: format!("{}{TIMECARD_FILE_SUFFIX}", now.format("%Y")),
                };
            }
        };

        let success = match self.append(access_token, &record, target).await {
            Ok(()) => {
                info!(staff = %record.staff_name, filename = %record.filename(), "punch recorded");
                true
            }
            Err(e) => {
                error!(error = %e, "failed to record punch");
                self.reporter
                    .report(&format!("punch recording failed: {e}"), access_token, &self.error_log_folder_id)
                    .await;
                false
            }
        };

        PunchReceipt { timestamp: record.formatted_timestamp(), success, filename: record.filename() }
    }

    async fn append(&self, access_token: &str, record: &PunchRecord, target: &PunchTarget) -> Result<()> {
        let folder_id = match target {
            PunchTarget::FolderId(id) => id.clone(),
            PunchTarget::FolderName(name) => self.files.ensure_folder(access_token, name).await?,
        };
        let filename = record.filename();

        let mut table = match self.files.read_text(access_token, &folder_id, &filename).await? {
            Some(text) => CsvTable::parse(&text)
                .map_err(|e| PunchcardError::Storage(format!("{filename} unreadable: {e}")))?,
            None => CsvTable::new(TIMECARD_HEADER),
        };
        table
            .push_row(record.cells())
            .map_err(|e| PunchcardError::Storage(format!("{filename}: {e}")))?;

        self.files.write_text(access_token, &folder_id, &filename, &table.to_csv_string()).await?;
        Ok(())
    }
}
