//! Small format helpers with no runtime dependencies.

pub mod csv;
