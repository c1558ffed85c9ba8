//! The seller registry store object.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use roastery_core::{SellerId, SellerPatch, SellerRecord};
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, instrument, warn};

use crate::config::RegistryConfig;
use crate::error::RegistryError;
use crate::merge::{self, Reconciliation};
use crate::names::{duplicate_company_names, is_name_available};
use crate::seed;
use crate::storage::{JsonFileStorage, SnapshotStorage};

/// All seller records keyed by ID.
pub type Snapshot = BTreeMap<SellerId, SellerRecord>;

/// Where the current snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistryMode {
    /// Nothing loaded yet.
    Unloaded,
    /// Reconciled from the persisted document.
    Persisted,
    /// No document (or an empty one) existed; the seed was adopted.
    Bootstrapped,
    /// The document could not be read or parsed; the seed was adopted.
    Degraded,
}

/// Health signal for operators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryStatus {
    pub mode: RegistryMode,
    pub location: String,
    pub records: usize,
    pub schema_version: u32,
    pub loaded_at: Option<DateTime<Utc>>,
    /// Why the most recent fallback to the seed happened. Kept until restart.
    pub last_load_error: Option<String>,
    /// Where the unreadable document was moved, if it was.
    pub quarantined_to: Option<String>,
    /// Error from the most recent write, cleared by the next successful one.
    pub last_write_error: Option<String>,
    /// Normalized company names held by more than one record.
    pub duplicate_names: Vec<String>,
}

impl RegistryStatus {
    fn new(location: String) -> Self {
        Self {
            mode: RegistryMode::Unloaded,
            location,
            records: 0,
            schema_version: merge::schema_version(),
            loaded_at: None,
            last_load_error: None,
            quarantined_to: None,
            last_write_error: None,
            duplicate_names: Vec::new(),
        }
    }

    /// `true` when memory and disk agree and no data was set aside.
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.mode != RegistryMode::Degraded
            && self.last_load_error.is_none()
            && self.last_write_error.is_none()
            && self.duplicate_names.is_empty()
    }
}

struct RegistryState {
    snapshot: Option<Arc<Snapshot>>,
    status: RegistryStatus,
}

struct RegistryInner<S> {
    storage: S,
    seed: Arc<Snapshot>,
    quarantine_corrupt: bool,
    state: RwLock<RegistryState>,
    /// Serializes every load and mutation (read-merge-write is atomic).
    writer: Mutex<()>,
}

/// Single source of truth for seller records within one process.
///
/// Construct once at startup and hand clones to whatever needs it; clones
/// share the same cache and writer lock.
pub struct SellerRegistry<S = JsonFileStorage> {
    inner: Arc<RegistryInner<S>>,
}

impl<S> Clone for SellerRegistry<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl SellerRegistry<JsonFileStorage> {
    /// Create a file-backed registry that loads lazily on first access.
    #[must_use]
    pub fn from_config(config: &RegistryConfig) -> Self {
        Self::build(
            JsonFileStorage::new(&config.path),
            seed::default_sellers(),
            config.quarantine_corrupt,
        )
    }

    /// Create a file-backed registry and load it immediately.
    pub async fn open(config: &RegistryConfig) -> Self {
        let registry = Self::from_config(config);
        registry.reload().await;
        registry
    }
}

impl<S: SnapshotStorage> SellerRegistry<S> {
    /// Create a registry over `storage` with the built-in seed dataset.
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self::build(storage, seed::default_sellers(), true)
    }

    /// Create a registry over `storage` with a custom seed dataset.
    #[must_use]
    pub fn with_seed(storage: S, seed: Snapshot) -> Self {
        Self::build(storage, seed, true)
    }

    fn build(storage: S, seed: Snapshot, quarantine_corrupt: bool) -> Self {
        let status = RegistryStatus::new(storage.location());
        Self {
            inner: Arc::new(RegistryInner {
                storage,
                seed: Arc::new(seed),
                quarantine_corrupt,
                state: RwLock::new(RegistryState {
                    snapshot: None,
                    status,
                }),
                writer: Mutex::new(()),
            }),
        }
    }

    /// The storage backend.
    #[must_use]
    pub fn storage(&self) -> &S {
        &self.inner.storage
    }

    /// All seller records, loading them first if nothing is cached.
    ///
    /// Never fails: an unusable document degrades to the seed dataset.
    pub async fn get_sellers_data(&self) -> Arc<Snapshot> {
        if let Some(snapshot) = self.cached().await {
            return snapshot;
        }

        let _writer = self.inner.writer.lock().await;
        // Another caller may have loaded while we waited for the lock
        if let Some(snapshot) = self.cached().await {
            return snapshot;
        }
        self.load_locked().await.0
    }

    /// One seller record, or `None` if the ID is unknown.
    pub async fn get_seller_profile(&self, id: &str) -> Option<SellerRecord> {
        self.get_sellers_data().await.get(id).cloned()
    }

    /// Re-read the persisted document and reconcile it with the seed.
    pub async fn reload(&self) -> Arc<Snapshot> {
        let _writer = self.inner.writer.lock().await;
        self.load_locked().await.0
    }

    /// Check whether `company_name` is free, ignoring the record `exclude_id`.
    ///
    /// Always checks against a fresh load. Returns `false` if that load could
    /// not read the persisted document, since the real state is unknown.
    #[instrument(skip(self))]
    pub async fn is_company_name_available(
        &self,
        company_name: &str,
        exclude_id: Option<&str>,
    ) -> bool {
        let _writer = self.inner.writer.lock().await;
        let (snapshot, mode) = self.load_locked().await;

        if mode == RegistryMode::Degraded {
            warn!("Registry degraded, reporting company name as unavailable");
            return false;
        }
        is_name_available(&snapshot, company_name, exclude_id)
    }

    /// Create or update a seller profile.
    ///
    /// The patch is shallow-merged over the current record (or over a default
    /// profile for an unknown ID); `id` stays the lookup key and `updatedAt`
    /// is stamped. The whole snapshot is then written back. A failed write is
    /// logged and reported through [`status`](Self::status); the cache still
    /// reflects the update.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateName` if the patch renames the seller
    /// (or provisions a new one) to a name another seller holds. Nothing is
    /// written in that case.
    #[instrument(skip(self, patch), fields(seller_id = %id))]
    pub async fn update_seller_profile(
        &self,
        id: &str,
        patch: SellerPatch,
    ) -> Result<SellerRecord, RegistryError> {
        let _writer = self.inner.writer.lock().await;
        let (snapshot, mode) = self.load_locked().await;

        let now = timestamp(Utc::now());
        let existing = snapshot.get(id);
        let is_new = existing.is_none();
        let requested_name = patch.requested_company_name().map(str::to_owned);

        let mut record = existing
            .cloned()
            .unwrap_or_else(|| seed::provisioned_profile(id, &now));
        record.apply_patch(patch);
        record.id = SellerId::new(id);
        record.updated_at = now;

        if requested_name.is_some() || is_new {
            let available = mode != RegistryMode::Degraded
                && is_name_available(&snapshot, &record.company_name, Some(id));
            if !available {
                let name = requested_name.unwrap_or(record.company_name);
                warn!(company_name = %name, ?mode, "Rejected duplicate company name");
                return Err(RegistryError::DuplicateName { name });
            }
        }

        let mut next = Snapshot::clone(&snapshot);
        next.insert(record.id.clone(), record.clone());
        let next = Arc::new(next);

        self.persist_locked(&next, None).await;
        self.install(Arc::clone(&next), None).await;

        if is_new {
            info!(company_name = %record.company_name, "Provisioned seller");
        } else {
            info!("Updated seller profile");
        }
        Ok(record)
    }

    /// Current health signal.
    pub async fn status(&self) -> RegistryStatus {
        self.inner.state.read().await.status.clone()
    }

    async fn cached(&self) -> Option<Arc<Snapshot>> {
        self.inner.state.read().await.snapshot.clone()
    }

    /// Load, reconcile, persist and install a snapshot. Caller holds `writer`.
    async fn load_locked(&self) -> (Arc<Snapshot>, RegistryMode) {
        let storage = &self.inner.storage;

        let failure = match storage.read().await {
            Ok(Some(document)) if !document.trim().is_empty() => {
                match merge::reconcile(&self.inner.seed, &document) {
                    Ok(reconciliation) => {
                        return self.adopt_reconciled(reconciliation, &document).await;
                    }
                    Err(e) => e.to_string(),
                }
            }
            Ok(_) => {
                info!(location = %storage.location(), "No seller document, bootstrapping from seed");
                return self.adopt_seed(RegistryMode::Bootstrapped).await;
            }
            Err(e) => e.to_string(),
        };

        warn!(
            location = %storage.location(),
            error = %failure,
            "Seller document unusable, falling back to seed"
        );

        let quarantined_to = if self.inner.quarantine_corrupt {
            let suffix = Utc::now().format("%Y%m%dT%H%M%S%.3fZ").to_string();
            match storage.quarantine(&suffix).await {
                Ok(moved) => {
                    if let Some(ref target) = moved {
                        warn!(target = %target, "Moved unreadable seller document aside");
                    }
                    moved
                }
                Err(e) => {
                    error!(error = %e, "Failed to move unreadable seller document aside");
                    None
                }
            }
        } else {
            None
        };

        {
            let mut state = self.inner.state.write().await;
            state.status.last_load_error = Some(failure);
            if quarantined_to.is_some() {
                state.status.quarantined_to = quarantined_to;
            }
        }

        self.adopt_seed(RegistryMode::Degraded).await
    }

    async fn adopt_reconciled(
        &self,
        reconciliation: Reconciliation,
        document: &str,
    ) -> (Arc<Snapshot>, RegistryMode) {
        let Reconciliation {
            snapshot,
            backfilled,
            stripped_fields,
        } = reconciliation;

        if !backfilled.is_empty() {
            info!(count = backfilled.len(), ids = ?backfilled, "Backfilled seed sellers");
        }
        if stripped_fields > 0 {
            info!(count = stripped_fields, "Stripped retired seller fields");
        }

        let snapshot = Arc::new(snapshot);
        self.persist_locked(&snapshot, Some(document)).await;
        self.install(Arc::clone(&snapshot), Some(RegistryMode::Persisted))
            .await;
        (snapshot, RegistryMode::Persisted)
    }

    async fn adopt_seed(&self, mode: RegistryMode) -> (Arc<Snapshot>, RegistryMode) {
        let snapshot = Arc::clone(&self.inner.seed);
        self.persist_locked(&snapshot, None).await;
        self.install(Arc::clone(&snapshot), Some(mode)).await;
        (snapshot, mode)
    }

    /// Write the full snapshot unless `previous` already matches it byte for byte.
    ///
    /// `last_write_error` is only cleared by a write that actually happened.
    async fn persist_locked(&self, snapshot: &Snapshot, previous: Option<&str>) {
        let outcome = match merge::to_document(snapshot) {
            Ok(document) if previous == Some(document.as_str()) => {
                debug!("Seller document already up to date");
                return;
            }
            Ok(document) => self
                .inner
                .storage
                .write(&document)
                .await
                .map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };

        if let Err(ref e) = outcome {
            error!(
                location = %self.inner.storage.location(),
                error = %e,
                "Failed to persist seller document"
            );
        }

        self.inner.state.write().await.status.last_write_error = outcome.err();
    }

    async fn install(&self, snapshot: Arc<Snapshot>, mode: Option<RegistryMode>) {
        let duplicate_names = duplicate_company_names(&snapshot);
        if !duplicate_names.is_empty() {
            warn!(names = ?duplicate_names, "Seller document holds duplicate company names");
        }

        let mut state = self.inner.state.write().await;
        state.status.records = snapshot.len();
        state.status.duplicate_names = duplicate_names;
        if let Some(mode) = mode {
            state.status.mode = mode;
            state.status.loaded_at = Some(Utc::now());
        }
        state.snapshot = Some(snapshot);
    }
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
