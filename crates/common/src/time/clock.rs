//! Wall-clock abstraction

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Source of the current wall-clock time.
///
/// Production code uses [`SystemClock`]; tests inject a controllable clock
/// (see `punchcard_common::testing::MockClock`).
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// Current instant in UTC.
    fn now_utc(&self) -> DateTime<Utc>;

    /// Current instant in the given civil timezone.
    fn now_in(&self, tz: Tz) -> DateTime<Tz> {
        self.now_utc().with_timezone(&tz)
    }
}

/// Real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
