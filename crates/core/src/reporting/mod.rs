//! Failure reporting

pub mod ports;
pub mod remote_log;

pub use ports::ErrorReporter;
pub use remote_log::{sanitize, RemoteErrorLog};
