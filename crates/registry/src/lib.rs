//! Roastery seller registry.
//!
//! A small persistent key-value store of seller profiles. The full set of
//! records (the snapshot) lives in memory and is mirrored by a single JSON
//! document. Every load reconciles the document with the seed dataset that
//! ships with the binary, and every update rewrites the whole document.
//!
//! # Guarantees
//!
//! - Company names are unique after trimming and case-folding. The check and
//!   the write happen under one writer lock, so concurrent renames cannot both
//!   claim the same name.
//! - Updates are never lost to a concurrent full-snapshot rewrite.
//! - A missing, empty, or unreadable document never fails a read: the
//!   registry falls back to the seed dataset and reports the degradation
//!   through [`SellerRegistry::status`].
//!
//! # Usage
//!
//! ```rust,no_run
//! use roastery_core::SellerPatch;
//! use roastery_registry::{RegistryConfig, SellerRegistry};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RegistryConfig::from_env()?;
//! let registry = SellerRegistry::open(&config).await;
//!
//! if registry.is_company_name_available("Brand New Co", None).await {
//!     registry
//!         .update_seller_profile("new-seller-42", SellerPatch::company_name("Brand New Co"))
//!         .await?;
//! }
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod merge;
pub mod names;
pub mod registry;
pub mod seed;
pub mod storage;

pub use config::{ConfigError, RegistryConfig};
pub use error::RegistryError;
pub use registry::{RegistryMode, RegistryStatus, SellerRegistry, Snapshot};
pub use storage::{JsonFileStorage, MemoryStorage, SnapshotStorage, StorageError};
