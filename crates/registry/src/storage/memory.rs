//! In-process storage, for tests and ephemeral registries.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use tokio::sync::Mutex;

use super::{SnapshotStorage, StorageError};

/// Keeps the document in memory.
///
/// Cloning shares the same document, so a test can keep a handle and inspect
/// or tamper with what the registry wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<MemoryInner>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    document: Mutex<Option<String>>,
    quarantined: Mutex<Vec<String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryStorage {
    /// Create empty storage (no document).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage that already holds `document`.
    #[must_use]
    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(MemoryInner {
                document: Mutex::new(Some(document.into())),
                ..MemoryInner::default()
            }),
        }
    }

    /// Current document, if any.
    pub async fn document(&self) -> Option<String> {
        self.inner.document.lock().await.clone()
    }

    /// Overwrite the document behind the registry's back.
    pub async fn set_document(&self, document: Option<String>) {
        *self.inner.document.lock().await = document;
    }

    /// Documents moved aside by [`SnapshotStorage::quarantine`], oldest first.
    pub async fn quarantined(&self) -> Vec<String> {
        self.inner.quarantined.lock().await.clone()
    }

    /// Make subsequent reads fail with an I/O error.
    pub fn fail_reads(&self, fail: bool) {
        self.inner.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent writes fail with an I/O error.
    pub fn fail_writes(&self, fail: bool) {
        self.inner.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful writes so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.inner.writes.load(Ordering::SeqCst)
    }
}

fn simulated(kind: std::io::ErrorKind) -> std::io::Error {
    std::io::Error::new(kind, "simulated failure")
}

impl SnapshotStorage for MemoryStorage {
    fn location(&self) -> String {
        "memory".to_string()
    }

    async fn read(&self) -> Result<Option<String>, StorageError> {
        if self.inner.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Read {
                location: self.location(),
                source: simulated(std::io::ErrorKind::PermissionDenied),
            });
        }
        Ok(self.inner.document.lock().await.clone())
    }

    async fn write(&self, document: &str) -> Result<(), StorageError> {
        if self.inner.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Write {
                location: self.location(),
                source: simulated(std::io::ErrorKind::StorageFull),
            });
        }
        *self.inner.document.lock().await = Some(document.to_owned());
        self.inner.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn quarantine(&self, suffix: &str) -> Result<Option<String>, StorageError> {
        let Some(document) = self.inner.document.lock().await.take() else {
            return Ok(None);
        };
        self.inner.quarantined.lock().await.push(document);
        Ok(Some(format!("memory.corrupt-{suffix}")))
    }
}
