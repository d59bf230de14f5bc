//! # Punchcard Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - The Google Drive `ObjectStore` adapter
//! - A retrying HTTP client
//! - Configuration loading (environment, JSON, TOML)
//! - reqwest → domain error conversions
//!
//! ## Architecture
//! - Implements traits defined in `punchcard-core`
//! - Contains all "impure" code (network, filesystem, environment)

pub mod config;
pub mod drive;
pub mod errors;
pub mod http;

// Re-export commonly used items
pub use drive::DriveObjectStore;
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
