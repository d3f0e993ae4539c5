// crates/labelforge-core/src/core/resource.rs
// ============================================================================
// Module: Labelforge Resource Model
// Description: Canonical representation of a governed cloud resource.
// Purpose: Provide the immutable input snapshot consumed by all engines.
// Dependencies: crate::core::identifiers, serde
// ============================================================================

//! ## Overview
//! A [`Resource`] is the canonical snapshot of a governed cloud resource:
//! identity, name, kind, location, status, and its label map. The label map
//! is always fully resolved; a key present with an empty string value is
//! distinct from an absent key. Labels are stored in a [`BTreeMap`] so that
//! repeated serialization and diffing are bit-identical.
//!
//! Violations are derived on demand by the policy engine and are never stored
//! on the resource. Audit history is owned externally and read-only here.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::ResourceId;

// ============================================================================
// SECTION: Label Map
// ============================================================================

/// Fully resolved label map for a resource.
///
/// Keys are unique; iteration order is the sorted key order.
pub type LabelMap = BTreeMap<String, String>;

// ============================================================================
// SECTION: Resource Kinds
// ============================================================================

/// Closed set of governed resource kinds.
///
/// # Invariants
/// - Variants are stable for serialization and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Virtual machine instance.
    Instance,
    /// Persistent disk.
    Disk,
    /// Object storage bucket.
    Bucket,
    /// Managed database.
    Database,
    /// Container cluster.
    Cluster,
    /// Serverless service.
    Service,
}

/// Resource lifecycle status as reported by the provider.
///
/// # Invariants
/// - Variants are stable for serialization and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceStatus {
    /// Resource is running and serving.
    Running,
    /// Resource is stopped.
    Stopped,
    /// Resource is being provisioned.
    Provisioning,
    /// Resource is in an error state.
    Error,
}

// ============================================================================
// SECTION: Resource
// ============================================================================

/// Canonical snapshot of a governed cloud resource.
///
/// # Invariants
/// - `labels` is fully resolved; empty-string values are legal and distinct
///   from absent keys.
/// - `proposed_labels` is `Some` only while a suggestion awaits
///   accept/reject; `None` means the resource is settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Provider-assigned stable identifier.
    pub id: ResourceId,
    /// Human-readable resource name; input to name-based extraction.
    pub name: String,
    /// Resource kind.
    pub kind: ResourceKind,
    /// Zone or region the resource lives in.
    pub zone: String,
    /// Provider-reported lifecycle status.
    pub status: ResourceStatus,
    /// Current label map.
    pub labels: LabelMap,
    /// Pending label suggestion awaiting accept/reject, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proposed_labels: Option<LabelMap>,
}

impl Resource {
    /// Creates a resource snapshot with no labels and no pending suggestion.
    #[must_use]
    pub fn new(
        id: impl Into<ResourceId>,
        name: impl Into<String>,
        kind: ResourceKind,
        zone: impl Into<String>,
        status: ResourceStatus,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            zone: zone.into(),
            status,
            labels: LabelMap::new(),
            proposed_labels: None,
        }
    }

    /// Returns true when a label suggestion is pending.
    #[must_use]
    pub const fn has_pending_suggestion(&self) -> bool {
        self.proposed_labels.is_some()
    }

    /// Accepts the pending suggestion, replacing the label map wholesale.
    ///
    /// A no-op when no suggestion is pending.
    pub fn accept_suggestion(&mut self) {
        if let Some(proposed) = self.proposed_labels.take() {
            self.labels = proposed;
        }
    }

    /// Rejects the pending suggestion without touching the label map.
    ///
    /// A no-op when no suggestion is pending.
    pub fn reject_suggestion(&mut self) {
        self.proposed_labels = None;
    }
}
