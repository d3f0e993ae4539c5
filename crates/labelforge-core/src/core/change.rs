// crates/labelforge-core/src/core/change.rs
// ============================================================================
// Module: Labelforge Change Records
// Description: Structured label change records derived from map pairs.
// Purpose: Provide the unit consumed by both the preview and the commit step.
// Dependencies: crate::core::resource, serde
// ============================================================================

//! ## Overview
//! A [`ChangeRecord`] describes one affected key on one resource. Records are
//! derivable from the (original, final) label maps alone via [`diff_labels`],
//! which is idempotent and order-independent: both maps iterate in sorted key
//! order, so recomputation from the same inputs is bit-identical.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::resource::LabelMap;

// ============================================================================
// SECTION: Change Records
// ============================================================================

/// Classification of a single label change.
///
/// # Invariants
/// - `Add` iff the old value is absent and the new value is present.
/// - `Delete` iff the new value is absent.
/// - `Modify` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// Key is introduced.
    Add,
    /// Key exists and its value changes.
    Modify,
    /// Key is removed.
    Delete,
}

/// One affected key on one resource.
///
/// # Invariants
/// - `kind` is consistent with `old_value`/`new_value` presence.
/// - An empty string value is a real value, not an absence marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    /// Affected label key.
    pub key: String,
    /// Value before the change, when the key existed.
    pub old_value: Option<String>,
    /// Value after the change, when the key survives.
    pub new_value: Option<String>,
    /// Change classification.
    pub kind: ChangeKind,
}

impl ChangeRecord {
    /// Builds a record from before/after values, classifying the kind.
    ///
    /// Returns `None` when the values are equal (including both absent):
    /// an unchanged key produces no record.
    #[must_use]
    pub fn from_values(
        key: impl Into<String>,
        old_value: Option<String>,
        new_value: Option<String>,
    ) -> Option<Self> {
        let kind = match (&old_value, &new_value) {
            (None, None) => return None,
            (Some(old), Some(new)) if old == new => return None,
            (None, Some(_)) => ChangeKind::Add,
            (Some(_), None) => ChangeKind::Delete,
            (Some(_), Some(_)) => ChangeKind::Modify,
        };
        Some(Self {
            key: key.into(),
            old_value,
            new_value,
            kind,
        })
    }
}

// ============================================================================
// SECTION: Map Diffing
// ============================================================================

/// Derives the change list between two label maps.
///
/// Output is sorted by key and depends only on the two maps, so recomputing
/// from the same inputs always yields the identical list. Diffing a map
/// against itself yields an empty list.
#[must_use]
pub fn diff_labels(original: &LabelMap, updated: &LabelMap) -> Vec<ChangeRecord> {
    let mut changes = Vec::new();
    for (key, old_value) in original {
        match updated.get(key) {
            Some(new_value) if new_value == old_value => {}
            Some(new_value) => {
                changes.push(ChangeRecord {
                    key: key.clone(),
                    old_value: Some(old_value.clone()),
                    new_value: Some(new_value.clone()),
                    kind: ChangeKind::Modify,
                });
            }
            None => {
                changes.push(ChangeRecord {
                    key: key.clone(),
                    old_value: Some(old_value.clone()),
                    new_value: None,
                    kind: ChangeKind::Delete,
                });
            }
        }
    }
    for (key, new_value) in updated {
        if !original.contains_key(key) {
            changes.push(ChangeRecord {
                key: key.clone(),
                old_value: None,
                new_value: Some(new_value.clone()),
                kind: ChangeKind::Add,
            });
        }
    }
    changes.sort_by(|a, b| a.key.cmp(&b.key));
    changes
}
