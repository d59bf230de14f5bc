//! Reversible encodings for secrets at rest.

pub mod obfuscation;

pub use obfuscation::{obfuscate, reveal, ObfuscationError};
