//! Google Drive object store adapter

pub mod object_store;

pub use object_store::DriveObjectStore;
