// crates/labelforge-core/src/interfaces/mod.rs
// ============================================================================
// Module: Labelforge Interfaces
// Description: Backend-agnostic boundary contracts and label constraints.
// Purpose: Define the apply-layer seams and provider label validation.
// Dependencies: crate::core, serde, thiserror
// ============================================================================

//! ## Overview
//! Interfaces define how the core hands off to external collaborators
//! without embedding backend-specific details. The core's obligation ends at
//! producing a correct resource-to-labels mapping; applying it to the cloud
//! provider and appending audit history belong to implementations of these
//! traits.
//!
//! Label constraint validation lives here because it is a boundary concern:
//! constraint failures are surfaced per field and gate commit, but they
//! never block preview computation. The core never silently truncates.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::history::HistoryEntry;
use crate::core::identifiers::ResourceId;
use crate::core::resource::LabelMap;
use crate::runtime::preview::ApplySet;

// ============================================================================
// SECTION: Label Constraints
// ============================================================================

/// Maximum length of a label key or value.
pub const MAX_LABEL_LENGTH: usize = 63;

/// Maximum number of labels per resource.
pub const MAX_LABELS_PER_RESOURCE: usize = 64;

/// Label constraint violations.
///
/// # Invariants
/// - Variants are stable for per-field surfacing in the studio UI.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LabelConstraintError {
    /// Key is empty.
    #[error("label key is empty")]
    EmptyKey,
    /// Key or value exceeds the provider length limit.
    #[error("label {field} '{text}' exceeds {MAX_LABEL_LENGTH} characters")]
    TooLong {
        /// Offending field name (`key` or `value`).
        field: String,
        /// Offending text.
        text: String,
    },
    /// Key or value contains a character outside the allowed set.
    #[error("label {field} '{text}' contains disallowed characters")]
    DisallowedCharacters {
        /// Offending field name (`key` or `value`).
        field: String,
        /// Offending text.
        text: String,
    },
    /// Key does not start with a lowercase letter.
    #[error("label key '{text}' must start with a lowercase letter")]
    BadKeyStart {
        /// Offending key.
        text: String,
    },
    /// Resource would exceed the per-resource label count limit.
    #[error("label count {count} exceeds {MAX_LABELS_PER_RESOURCE} labels per resource")]
    TooManyLabels {
        /// Proposed label count.
        count: usize,
    },
}

/// Returns true when every character is a lowercase alphanumeric, dash, or
/// underscore.
fn charset_ok(text: &str) -> bool {
    text.chars().all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-' || ch == '_')
}

/// Validates a label key against provider constraints.
///
/// Keys are 1..=63 characters of lowercase alphanumerics, dashes, and
/// underscores, and must start with a lowercase letter.
///
/// # Errors
///
/// Returns [`LabelConstraintError`] describing the first failed constraint.
pub fn validate_label_key(key: &str) -> Result<(), LabelConstraintError> {
    if key.is_empty() {
        return Err(LabelConstraintError::EmptyKey);
    }
    // Length is measured in characters; a multi-byte string over the byte
    // count but within the character count fails on charset instead.
    if key.chars().count() > MAX_LABEL_LENGTH {
        return Err(LabelConstraintError::TooLong {
            field: "key".to_owned(),
            text: key.to_owned(),
        });
    }
    if !key.starts_with(|ch: char| ch.is_ascii_lowercase()) {
        return Err(LabelConstraintError::BadKeyStart {
            text: key.to_owned(),
        });
    }
    if !charset_ok(key) {
        return Err(LabelConstraintError::DisallowedCharacters {
            field: "key".to_owned(),
            text: key.to_owned(),
        });
    }
    Ok(())
}

/// Validates a label value against provider constraints.
///
/// Values are 0..=63 characters of lowercase alphanumerics, dashes, and
/// underscores; the empty string is legal.
///
/// # Errors
///
/// Returns [`LabelConstraintError`] describing the first failed constraint.
pub fn validate_label_value(value: &str) -> Result<(), LabelConstraintError> {
    if value.chars().count() > MAX_LABEL_LENGTH {
        return Err(LabelConstraintError::TooLong {
            field: "value".to_owned(),
            text: value.to_owned(),
        });
    }
    if !charset_ok(value) {
        return Err(LabelConstraintError::DisallowedCharacters {
            field: "value".to_owned(),
            text: value.to_owned(),
        });
    }
    Ok(())
}

/// Validates a whole label map, collecting every per-field failure.
///
/// Returns all failures rather than the first so the studio can surface them
/// per field; an empty vector means the map is commit-safe.
#[must_use]
pub fn validate_label_map(labels: &LabelMap) -> Vec<LabelConstraintError> {
    let mut errors = Vec::new();
    if labels.len() > MAX_LABELS_PER_RESOURCE {
        errors.push(LabelConstraintError::TooManyLabels {
            count: labels.len(),
        });
    }
    for (key, value) in labels {
        if let Err(error) = validate_label_key(key) {
            errors.push(error);
        }
        if let Err(error) = validate_label_value(value) {
            errors.push(error);
        }
    }
    errors
}

// ============================================================================
// SECTION: Apply Layer
// ============================================================================

/// Receipt returned by the apply-layer for one committed resource.
///
/// # Invariants
/// - `resource_id` refers to a key of the submitted apply set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyReceipt {
    /// Resource whose labels were applied.
    pub resource_id: ResourceId,
    /// History entry appended by the audit log.
    pub history: HistoryEntry,
}

/// Apply-layer errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ApplyError {
    /// Provider rejected the label update.
    #[error("provider rejected update for {resource_id}: {reason}")]
    Rejected {
        /// Resource the provider rejected.
        resource_id: ResourceId,
        /// Provider-supplied reason.
        reason: String,
    },
    /// Transport or backend failure.
    #[error("apply backend error: {0}")]
    Backend(String),
}

/// External collaborator that applies committed label sets.
///
/// Implementations own transport, retries, and exclusivity across
/// overlapping commits; the core only produces the apply set.
pub trait LabelApplier {
    /// Applies the committed label maps and returns one receipt per resource.
    ///
    /// # Errors
    ///
    /// Returns [`ApplyError`] when the update cannot be applied.
    fn apply(&self, changes: &ApplySet) -> Result<Vec<ApplyReceipt>, ApplyError>;
}

/// External audit log consuming label state history.
///
/// History is append-only and read-only from the core's perspective.
pub trait AuditSink {
    /// Appends a history entry for a resource.
    ///
    /// # Errors
    ///
    /// Returns [`ApplyError`] when the entry cannot be recorded.
    fn append(&self, resource_id: &ResourceId, entry: HistoryEntry) -> Result<(), ApplyError>;
}
