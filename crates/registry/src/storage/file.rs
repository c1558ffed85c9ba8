//! Single-file JSON storage with atomic replace.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

use super::{SnapshotStorage, StorageError};

/// Stores the document at one path on the local filesystem.
///
/// Writes go to a `.tmp` sibling that is flushed to disk and then renamed over
/// the target, so a crash mid-write leaves the previous document intact.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Create storage for the document at `path`. Nothing is touched until first use.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map_or_else(|| OsString::from("sellers.json"), ToOwned::to_owned);
        name.push(suffix);
        self.path.with_file_name(name)
    }

    fn write_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Write {
            location: self.location(),
            source,
        }
    }
}

impl SnapshotStorage for JsonFileStorage {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    async fn read(&self) -> Result<Option<String>, StorageError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(document) => Ok(Some(document)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read {
                location: self.location(),
                source,
            }),
        }
    }

    async fn write(&self, document: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.write_error(e))?;
        }

        let tmp = self.sibling(".tmp");
        let mut file = tokio::fs::File::create(&tmp)
            .await
            .map_err(|e| self.write_error(e))?;
        file.write_all(document.as_bytes())
            .await
            .map_err(|e| self.write_error(e))?;
        file.sync_all().await.map_err(|e| self.write_error(e))?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| self.write_error(e))
    }

    async fn quarantine(&self, suffix: &str) -> Result<Option<String>, StorageError> {
        let target = self.sibling(&format!(".corrupt-{suffix}"));
        match tokio::fs::rename(&self.path, &target).await {
            Ok(()) => Ok(Some(target.display().to_string())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Quarantine {
                location: self.location(),
                source,
            }),
        }
    }
}
