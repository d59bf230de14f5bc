//! Modular common utilities shared across Punchcard crates.
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - `foundation`: CSV tables, civil-time formatting
//! - `runtime`: clock abstraction, obfuscation codec
//! - `platform`: OAuth token endpoint client, shared HTTP proxy policy
//! - `observability`: tracing (pulled in by `runtime`)
//! - `test-utils`: mock clock and scripted token exchanger

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

// Foundation tier
// -----------------------------------------------------------------
#[cfg(feature = "foundation")]
pub mod utils;

// Runtime tier
// --------------------------------------------------------------------
#[cfg(feature = "runtime")]
pub mod crypto;
#[cfg(feature = "runtime")]
pub mod time;

// Platform tier
// -------------------------------------------------------------------
#[cfg(feature = "platform")]
pub mod auth;
#[cfg(feature = "platform")]
pub mod http;

// Testing utilities
// ---------------------------------------------------------------
#[cfg(feature = "test-utils")]
pub mod testing;

// Re-export commonly used types and traits for convenience
// ------------------------
#[cfg(feature = "platform")]
pub use auth::{ExchangeError, OAuthClient, OAuthConfig, RefreshedToken, TokenExchanger, TokenGrant};
#[cfg(feature = "runtime")]
pub use crypto::{obfuscate, reveal, ObfuscationError};
#[cfg(feature = "runtime")]
pub use time::{Clock, SystemClock};
#[cfg(feature = "foundation")]
pub use utils::csv::{CsvError, CsvTable};
