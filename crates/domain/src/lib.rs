//! # Punchcard Domain
//!
//! Business domain types and models for Punchcard.
//!
//! This crate contains:
//! - Session, punch and store-query types
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants (artifact names, endpoints, CSV headers)
//!
//! ## Architecture
//! - No dependencies on other Punchcard crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
