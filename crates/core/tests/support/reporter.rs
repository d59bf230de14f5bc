//! Error reporter that keeps every report in memory.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use punchcard_core::ErrorReporter;

/// One captured report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub message: String,
    pub access_token: String,
    pub folder_id: String,
}

#[derive(Clone, Default)]
pub struct RecordingReporter {
    reports: Arc<Mutex<Vec<Report>>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<Report> {
        self.reports.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.reports.lock().len()
    }
}

#[async_trait]
impl ErrorReporter for RecordingReporter {
    async fn report(&self, message: &str, access_token: &str, folder_id: &str) {
        self.reports.lock().push(Report {
            message: message.to_string(),
            access_token: access_token.to_string(),
            folder_id: folder_id.to_string(),
        });
    }
}
