//! # Punchcard Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces (`ObjectStore`, `ErrorReporter`)
//! - The OAuth session lifecycle (`RefreshTokenStore`, `SessionManager`)
//! - The error log and punch recording services
//!
//! ## Architecture Principles
//! - Only depends on `punchcard-common` and `punchcard-domain`
//! - No HTTP or Drive-specific code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod auth;
pub mod punch;
pub mod reporting;
pub mod storage;

pub use auth::{
    RefreshTokenStore, SessionContext, SessionManager, SessionResolution, TokenStoreError,
};
pub use punch::{PunchRecorder, PunchTarget};
pub use reporting::{ErrorReporter, RemoteErrorLog};
pub use storage::{ObjectStore, RemoteFiles};
