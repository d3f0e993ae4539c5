// crates/labelforge-core/src/core/history.rs
// ============================================================================
// Module: Labelforge Audit History Records
// Description: Append-only label state records for external audit logs.
// Purpose: Define the record shape the apply-layer appends after each commit.
// Dependencies: crate::core::{hashing, resource, time}, serde
// ============================================================================

//! ## Overview
//! Audit history is owned by an external collaborator and is read-only from
//! the core's perspective. This module only defines the record shape: an
//! ordered, append-only sequence of past label states, each carrying a
//! canonical state digest so the log can verify and deduplicate snapshots.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::hashing::HashDigest;
use crate::core::hashing::HashError;
use crate::core::hashing::label_state_hash;
use crate::core::resource::LabelMap;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: History Records
// ============================================================================

/// One past label state in a resource's audit history.
///
/// # Invariants
/// - `seq` is monotonic within a resource's history.
/// - `state_hash` is the canonical digest of `labels`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Monotonic sequence number assigned by the audit log.
    pub seq: u64,
    /// Timestamp supplied by the recording host.
    pub recorded_at: Timestamp,
    /// Label state at this point in history.
    pub labels: LabelMap,
    /// Canonical digest of `labels`.
    pub state_hash: HashDigest,
    /// Optional free-form note (who/what triggered the change).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl HistoryEntry {
    /// Builds a history entry, computing the canonical state digest.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] when the label map cannot be canonicalized.
    pub fn record(
        seq: u64,
        recorded_at: Timestamp,
        labels: LabelMap,
        note: Option<String>,
    ) -> Result<Self, HashError> {
        let state_hash = label_state_hash(&labels)?;
        Ok(Self {
            seq,
            recorded_at,
            labels,
            state_hash,
            note,
        })
    }
}
