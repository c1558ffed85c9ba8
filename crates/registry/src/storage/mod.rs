//! Durable storage for the registry's JSON document.
//!
//! The registry only ever reads or replaces the whole document, so a backend
//! deals in strings and knows nothing about seller records.

use std::future::Future;

mod file;
mod memory;

pub use file::JsonFileStorage;
pub use memory::MemoryStorage;

/// Error type for storage backends.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to read {location}: {source}")]
    Read {
        location: String,
        source: std::io::Error,
    },
    #[error("failed to write {location}: {source}")]
    Write {
        location: String,
        source: std::io::Error,
    },
    #[error("failed to move {location} aside: {source}")]
    Quarantine {
        location: String,
        source: std::io::Error,
    },
}

/// A place the registry snapshot document is kept.
pub trait SnapshotStorage: Send + Sync + 'static {
    /// Human-readable location, used in logs and status output.
    fn location(&self) -> String;

    /// Read the whole document. `Ok(None)` means it does not exist yet.
    fn read(&self) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Replace the whole document. Readers never observe a partial write.
    fn write(&self, document: &str) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Move the current document aside, tagged with `suffix`, and return where
    /// it went. `Ok(None)` if there was nothing to move.
    fn quarantine(
        &self,
        suffix: &str,
    ) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;
}
