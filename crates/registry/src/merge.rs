//! Reconciliation of the persisted document with the seed dataset.
//!
//! For every ID in the document that also exists in the seed, the persisted
//! keys are laid over the seed record (`{ ...seed, ...persisted }`); IDs only
//! in the document are kept as written; seed IDs missing from the document are
//! added unchanged. Retired legacy keys are dropped and `id` is forced to the
//! map key. Running this on its own output yields the same snapshot.

use roastery_core::{SellerId, SellerRecord};
use serde_json::{Map, Value};

use crate::registry::Snapshot;

/// A set of top-level record keys retired by a schema version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegacyFieldRetirement {
    pub schema_version: u32,
    pub fields: &'static [&'static str],
}

/// Every retirement so far, oldest first. All of them are applied on every load.
pub const LEGACY_FIELD_RETIREMENTS: &[LegacyFieldRetirement] = &[
    // Derived from the seller ID at render time.
    LegacyFieldRetirement {
        schema_version: 2,
        fields: &["brandColor"],
    },
    // Owned by the catalog and QR services.
    LegacyFieldRetirement {
        schema_version: 3,
        fields: &["coffeeEntries", "qrCodeUrl"],
    },
];

/// Current schema version (the newest retirement).
#[must_use]
pub fn schema_version() -> u32 {
    LEGACY_FIELD_RETIREMENTS
        .iter()
        .map(|r| r.schema_version)
        .max()
        .unwrap_or(1)
}

fn retired_fields() -> impl Iterator<Item = &'static str> {
    LEGACY_FIELD_RETIREMENTS
        .iter()
        .flat_map(|r| r.fields.iter().copied())
}

/// Remove retired keys from a record object, returning how many were present.
fn strip_retired_fields(object: &mut Map<String, Value>) -> usize {
    retired_fields()
        .filter(|field| object.remove(*field).is_some())
        .count()
}

/// Errors that make a persisted document unusable.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error("document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("document root must be an object mapping seller id to record")]
    NotAnObject,
    #[error("record {id} is not an object")]
    RecordNotAnObject { id: String },
    #[error("record {id} is invalid: {source}")]
    InvalidRecord {
        id: String,
        source: serde_json::Error,
    },
}

/// Result of a successful reconciliation.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    pub snapshot: Snapshot,
    /// Seed IDs that were missing from the document.
    pub backfilled: Vec<SellerId>,
    /// Number of retired keys dropped across all records.
    pub stripped_fields: usize,
}

/// Reconcile a persisted document with the seed dataset.
///
/// # Errors
///
/// Returns an error if the document is not a JSON object of objects, or a
/// record cannot be read as a [`SellerRecord`].
pub fn reconcile(seed: &Snapshot, document: &str) -> Result<Reconciliation, ReconcileError> {
    let Value::Object(entries) = serde_json::from_str::<Value>(document)? else {
        return Err(ReconcileError::NotAnObject);
    };

    let mut snapshot = Snapshot::new();
    let mut stripped_fields = 0;

    for (id, value) in entries {
        let Value::Object(persisted) = value else {
            return Err(ReconcileError::RecordNotAnObject { id });
        };

        let mut merged = match seed.get(id.as_str()) {
            Some(seed_record) => {
                let mut base = record_object(seed_record)?;
                base.extend(persisted);
                base
            }
            None => persisted,
        };

        stripped_fields += strip_retired_fields(&mut merged);
        merged.insert("id".to_string(), Value::String(id.clone()));

        let record: SellerRecord = serde_json::from_value(Value::Object(merged))
            .map_err(|source| ReconcileError::InvalidRecord {
                id: id.clone(),
                source,
            })?;
        snapshot.insert(SellerId::new(id), record);
    }

    let mut backfilled = Vec::new();
    for (id, record) in seed {
        if !snapshot.contains_key(id) {
            snapshot.insert(id.clone(), record.clone());
            backfilled.push(id.clone());
        }
    }

    Ok(Reconciliation {
        snapshot,
        backfilled,
        stripped_fields,
    })
}

fn record_object(record: &SellerRecord) -> Result<Map<String, Value>, ReconcileError> {
    match serde_json::to_value(record)? {
        Value::Object(object) => Ok(object),
        _ => Err(ReconcileError::RecordNotAnObject {
            id: record.id.to_string(),
        }),
    }
}

/// Serialize a snapshot into the persisted document format.
///
/// # Errors
///
/// Returns an error if a record cannot be serialized.
pub fn to_document(snapshot: &Snapshot) -> Result<String, serde_json::Error> {
    let mut document = serde_json::to_string_pretty(snapshot)?;
    document.push('\n');
    Ok(document)
}
