//! Time-clock punches

use chrono::DateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::constants::{TIMECARD_FILE_SUFFIX, TIMESTAMP_FORMAT};
use crate::impl_domain_status_conversions;
use crate::{PunchcardError, Result};

/// Direction of a punch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PunchMode {
    In,
    Out,
}

impl_domain_status_conversions!(PunchMode {
    In => "in",
    Out => "out",
});

impl PunchMode {
    /// Label written to the timecard's mode column.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::In => "出勤",
            Self::Out => "退勤",
        }
    }
}

/// One row of a yearly timecard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PunchRecord {
    pub staff_name: String,
    pub mode: PunchMode,
    pub timestamp: DateTime<Tz>,
}

impl PunchRecord {
    /// Build a record, rejecting blank staff names.
    ///
    /// # Errors
    /// Returns `PunchcardError::InvalidInput` if `staff_name` is blank.
    pub fn new(staff_name: &str, mode: PunchMode, timestamp: DateTime<Tz>) -> Result<Self> {
        let staff_name = staff_name.trim();
        if staff_name.is_empty() {
            return Err(PunchcardError::InvalidInput("staff name must not be empty".into()));
        }
        Ok(Self { staff_name: staff_name.to_string(), mode, timestamp })
    }

    /// `<YYYY>_timecard.csv`, the year taken in the record's timezone.
    #[must_use]
    pub fn filename(&self) -> String {
        format!("{}{}", self.timestamp.format("%Y"), TIMECARD_FILE_SUFFIX)
    }

    #[must_use]
    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    /// Cells in timecard column order.
    #[must_use]
    pub fn cells(&self) -> Vec<String> {
        vec![self.staff_name.clone(), self.mode.label().to_string(), self.formatted_timestamp()]
    }
}

/// What the caller learns about a recorded punch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunchReceipt {
    pub timestamp: String,
    pub success: bool,
    pub filename: String,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono_tz::Asia::Tokyo;

    use super::*;

    #[test]
    fn filename_uses_civil_year() {
        // 2024-12-31T15:30Z is already New Year's Day in Tokyo.
        let ts = chrono::Utc.with_ymd_and_hms(2024, 12, 31, 15, 30, 0).unwrap().with_timezone(&Tokyo);
        let record = PunchRecord::new("田中", PunchMode::In, ts).unwrap();

        assert_eq!(record.filename(), "2025_timecard.csv");
        assert_eq!(record.formatted_timestamp(), "2025-01-01 00:30:00");
    }

    #[test]
    fn cells_follow_header_order() {
        let ts = Tokyo.with_ymd_and_hms(2025, 6, 2, 9, 0, 5).unwrap();
        let record = PunchRecord::new("  佐藤 ", PunchMode::Out, ts).unwrap();

        assert_eq!(record.cells(), vec!["佐藤", "退勤", "2025-06-02 09:00:05"]);
    }

    #[test]
    fn blank_staff_name_is_rejected() {
        let ts = Tokyo.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).unwrap();
        assert!(matches!(
            PunchRecord::new("   ", PunchMode::In, ts),
            Err(PunchcardError::InvalidInput(_))
        ));
    }

    #[test]
    fn mode_parses_from_wire_names() {
        assert_eq!("IN".parse::<PunchMode>(), Ok(PunchMode::In));
        assert_eq!(serde_json::from_str::<PunchMode>(r#""out""#).unwrap(), PunchMode::Out);
    }
}
