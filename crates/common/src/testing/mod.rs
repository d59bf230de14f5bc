//! Testing utilities and helpers
//!
//! - **[`mocks`]**: scripted `TokenExchanger` (with the `platform` feature)
//! - **[`time`]**: controllable clock
//!
//! ## Usage
//!
//! ```rust
//! # #[cfg(feature = "test-utils")]
//! # {
//! use chrono::TimeDelta;
//! use punchcard_common::testing::MockClock;
//!
//! let clock = MockClock::new();
//! clock.advance(TimeDelta::seconds(5));
//! # }
//! ```

pub mod mocks;
pub mod time;

#[cfg(feature = "platform")]
pub use mocks::MockTokenExchanger;
pub use time::MockClock;
