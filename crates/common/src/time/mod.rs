//! Time utilities and abstractions
//!
//! - **[`clock`]**: wall-clock abstraction so expiry logic can be driven by a
//!   mock clock in tests
//! - **[`format`]**: civil-time timestamp formatting
//!
//! ## Usage
//!
//! ```rust
//! # #[cfg(feature = "runtime")]
//! # {
//! use chrono_tz::Asia::Tokyo;
//! use punchcard_common::time::{format_civil, Clock, SystemClock};
//!
//! let now = SystemClock.now_in(Tokyo);
//! assert_eq!(format_civil(&now).len(), "2025-01-01 00:00:00".len());
//! # }
//! ```

pub mod clock;
pub mod format;

pub use clock::{Clock, SystemClock};
pub use format::format_civil;
