//! # Punchcard API
//!
//! HTTP application layer - routes and main entry point.
//!
//! This crate contains:
//! - Routes (browser / kiosk → backend bridge)
//! - Application context (dependency injection)
//! - Logging bootstrap
//!
//! ## Architecture
//! - Depends on `common`, `core`, and `infra`
//! - Wires up the hexagonal architecture
//! - Serves the session and punch endpoints over axum

pub mod context;
pub mod errors;
pub mod routes;
pub mod utils;

pub use context::AppContext;
pub use errors::ApiError;
pub use routes::router;
