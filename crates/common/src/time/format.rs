//! Civil-time formatting

use chrono::DateTime;
use chrono_tz::Tz;
use punchcard_domain::constants::TIMESTAMP_FORMAT;

/// Format as `YYYY-MM-DD HH:MM:SS` in the timestamp's own timezone.
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "runtime")]
/// # {
/// use chrono::TimeZone;
/// use chrono_tz::Asia::Tokyo;
/// use punchcard_common::time::format_civil;
///
/// let ts = Tokyo.with_ymd_and_hms(2025, 4, 1, 8, 59, 3).unwrap();
/// assert_eq!(format_civil(&ts), "2025-04-01 08:59:03");
/// # }
/// ```
#[must_use]
pub fn format_civil(timestamp: &DateTime<Tz>) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}
