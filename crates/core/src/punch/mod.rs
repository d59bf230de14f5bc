//! Time-clock punches

pub mod service;

pub use service::{PunchRecorder, PunchTarget};
