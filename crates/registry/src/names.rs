//! Company-name uniqueness over a snapshot.

use std::collections::BTreeMap;

use roastery_core::normalize_company_name;

use crate::registry::Snapshot;

/// Returns `true` if no record other than `exclude_id` holds `name`
/// (trimmed, case-insensitive).
#[must_use]
pub fn is_name_available(snapshot: &Snapshot, name: &str, exclude_id: Option<&str>) -> bool {
    let wanted = normalize_company_name(name);
    !snapshot
        .values()
        .filter(|record| exclude_id != Some(record.id.as_str()))
        .any(|record| record.normalized_company_name() == wanted)
}

/// Normalized names held by more than one record, sorted.
///
/// Empty in a healthy registry; a non-empty result means the persisted
/// document was edited by hand or written by an older, unserialized release.
#[must_use]
pub fn duplicate_company_names(snapshot: &Snapshot) -> Vec<String> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for record in snapshot.values() {
        *counts.entry(record.normalized_company_name()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(name, _)| name)
        .collect()
}
