//! Remote object store port and name-addressed file helpers

pub mod files;
pub mod ports;

pub use files::RemoteFiles;
pub use ports::ObjectStore;
