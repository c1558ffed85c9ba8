//! Integration tests for Roastery.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p roastery-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `seller_registry` - File-backed registry behaviour across loads, writes
//!   and restarts, using a temporary directory per test
//!
//! Helpers shared by the test files live here.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::{Path, PathBuf};

use roastery_registry::{RegistryConfig, SellerRegistry};
use tempfile::TempDir;

/// A registry document inside its own temporary directory.
pub struct TestRegistry {
    dir: TempDir,
    path: PathBuf,
}

impl TestRegistry {
    /// Create an empty directory; the document does not exist yet.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("sellers.json");
        Self { dir, path }
    }

    /// Directory holding the document and any quarantined copies.
    #[must_use]
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Location of the seller document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Configuration pointing at the document.
    #[must_use]
    pub fn config(&self) -> RegistryConfig {
        RegistryConfig::default().with_path(self.path.clone())
    }

    /// A fresh registry over the document, as a newly started process would see it.
    #[must_use]
    pub fn open(&self) -> SellerRegistry {
        SellerRegistry::from_config(&self.config())
    }

    /// Write raw document contents.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    #[allow(clippy::expect_used)]
    pub fn write_document(&self, contents: &str) {
        std::fs::write(&self.path, contents).expect("write document");
    }

    /// Raw document contents, or `None` if absent.
    #[must_use]
    pub fn read_document(&self) -> Option<String> {
        std::fs::read_to_string(&self.path).ok()
    }

    /// The document parsed as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the document is missing or not JSON.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn document_json(&self) -> serde_json::Value {
        let contents = self.read_document().expect("document exists");
        serde_json::from_str(&contents).expect("document is JSON")
    }

    /// File names in the directory other than the document, sorted.
    ///
    /// # Panics
    ///
    /// Panics if the directory cannot be listed.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn other_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.dir.path())
            .expect("list temp dir")
            .filter_map(Result::ok)
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .filter(|name| name != "sellers.json")
            .collect();
        names.sort();
        names
    }
}

impl Default for TestRegistry {
    fn default() -> Self {
        Self::new()
    }
}
