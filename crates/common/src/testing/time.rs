//! Controllable clock for deterministic expiry tests
//!
//! # Examples
//!
//! ```
//! # #[cfg(feature = "test-utils")]
//! # {
//! use chrono::{TimeDelta, TimeZone, Utc};
//! use punchcard_common::testing::MockClock;
//! use punchcard_common::time::Clock;
//!
//! let clock = MockClock::at(Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap());
//! clock.advance(TimeDelta::seconds(3601));
//! assert_eq!(clock.now_utc(), Utc.with_ymd_and_hms(2025, 4, 1, 1, 0, 1).unwrap());
//! # }
//! ```

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::Mutex;

use crate::time::Clock;

/// Mock clock for deterministic testing
///
/// Clones share the same instant, so a clock handed to a service can still
/// be advanced by the test that created it.
#[derive(Debug, Clone)]
pub struct MockClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl MockClock {
    /// Clock frozen at the current real time.
    #[must_use]
    pub fn new() -> Self {
        Self::at(Utc::now())
    }

    /// Clock frozen at `instant`.
    #[must_use]
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self { now: Arc::new(Mutex::new(instant)) }
    }

    /// Move the clock forward (or backward, for a negative delta).
    pub fn advance(&self, delta: TimeDelta) {
        let mut now = self.now.lock();
        *now += delta;
    }

    /// Jump to an absolute instant.
    pub fn set(&self, instant: DateTime<Utc>) {
        *self.now.lock() = instant;
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MockClock {
    fn now_utc(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}
