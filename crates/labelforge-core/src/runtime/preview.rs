// crates/labelforge-core/src/runtime/preview.rs
// ============================================================================
// Module: Labelforge Bulk Preview Orchestrator
// Description: Fleet-wide preview aggregation and two-step commit session.
// Purpose: Aggregate per-resource deltas and gate commit behind review.
// Dependencies: crate::core, crate::runtime::{diff, strategy}, thiserror
// ============================================================================

//! ## Overview
//! The orchestrator runs the diff engine across a resource collection and
//! aggregates per-resource previews. Resources with zero applicable changes
//! are excluded entirely, so the preview size equals the number of genuinely
//! affected resources. [`apply_preview`] is a pure projection that strips the
//! bookkeeping and yields the terminal label map per affected resource for
//! the external apply-layer.
//!
//! [`StudioSession`] is the two-step confirmation state machine:
//! `Configure -> Review -> (commit | back)`. Review is reachable only when
//! the active rule is valid and the computed preview is non-empty; both
//! conditions are required. Misuse is precluded with typed errors rather
//! than panics.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::change::ChangeRecord;
use crate::core::identifiers::ResourceId;
use crate::core::resource::LabelMap;
use crate::core::resource::Resource;
use crate::runtime::diff::compute_label_delta;
use crate::runtime::strategy::ExtractionRule;
use crate::runtime::strategy::RuleKind;
use crate::runtime::strategy::StudioConfig;

// ============================================================================
// SECTION: Preview Types
// ============================================================================

/// Per-resource preview entry.
///
/// # Invariants
/// - `changes` is non-empty; no-op resources never enter the preview.
/// - `changes` equals `diff_labels(&original, &final_labels)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewEntry {
    /// Label map before the transformation.
    pub original: LabelMap,
    /// Label map after the transformation.
    pub final_labels: LabelMap,
    /// Structured change list, sorted by key.
    pub changes: Vec<ChangeRecord>,
}

/// Aggregated preview keyed by resource identifier.
pub type Preview = BTreeMap<ResourceId, PreviewEntry>;

/// Terminal label maps per affected resource, the commit hand-off artifact.
pub type ApplySet = BTreeMap<ResourceId, LabelMap>;

// ============================================================================
// SECTION: Preview Construction
// ============================================================================

/// Builds the aggregated preview for a resource collection under a rule.
///
/// Pure and re-entrant; callers recompute whenever resources, strategy, or
/// parameters change (last-write-wins, no shared state). Resources whose
/// delta is a no-op are excluded from the map entirely.
#[must_use]
pub fn build_preview(resources: &[Resource], rule: &ExtractionRule) -> Preview {
    let mut preview = Preview::new();
    for resource in resources {
        let delta = compute_label_delta(resource, rule);
        if delta.is_noop() {
            continue;
        }
        preview.insert(
            resource.id.clone(),
            PreviewEntry {
                original: resource.labels.clone(),
                final_labels: delta.final_labels,
                changes: delta.changes,
            },
        );
    }
    preview
}

/// Projects a preview into the terminal label map per affected resource.
///
/// Performs no I/O; the external apply-layer owns the actual update and the
/// audit history append.
#[must_use]
pub fn apply_preview(preview: &Preview) -> ApplySet {
    preview
        .iter()
        .map(|(id, entry)| (id.clone(), entry.final_labels.clone()))
        .collect()
}

// ============================================================================
// SECTION: Studio Session
// ============================================================================

/// Session phase in the two-step confirmation flow.
///
/// # Invariants
/// - Variants are stable for serialization and UI state mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudioPhase {
    /// Strategy parameters are being edited.
    Configure,
    /// Aggregated preview is under review.
    Review,
}

/// Studio session misuse errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StudioError {
    /// Review was requested with an incomplete strategy configuration.
    #[error("strategy configuration is incomplete")]
    InvalidConfig,
    /// Review was requested while the computed preview is empty.
    #[error("preview contains no affected resources")]
    EmptyPreview,
    /// The operation is not legal in the current phase.
    #[error("operation not allowed in phase {phase:?}")]
    WrongPhase {
        /// Phase the session was in.
        phase: StudioPhase,
    },
}

/// Two-step confirmation state machine for bulk label commits.
///
/// # Invariants
/// - `Review` is reachable only when the active rule is valid and the
///   preview is non-empty.
/// - Going back to `Configure` preserves all entered parameters.
/// - Committing consumes the session; retry/rollback belongs to the external
///   apply-layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudioSession {
    /// Current phase.
    phase: StudioPhase,
    /// Retained strategy parameters for all variants.
    config: StudioConfig,
    /// Preview frozen at review time; empty while configuring.
    reviewed: Preview,
}

impl StudioSession {
    /// Opens a session in the configure phase.
    #[must_use]
    pub fn new(config: StudioConfig) -> Self {
        Self {
            phase: StudioPhase::Configure,
            config,
            reviewed: Preview::new(),
        }
    }

    /// Returns the current phase.
    #[must_use]
    pub const fn phase(&self) -> StudioPhase {
        self.phase
    }

    /// Returns the retained configuration.
    #[must_use]
    pub const fn config(&self) -> &StudioConfig {
        &self.config
    }

    /// Mutable access to the configuration while configuring.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::WrongPhase`] outside the configure phase.
    pub fn config_mut(&mut self) -> Result<&mut StudioConfig, StudioError> {
        match self.phase {
            StudioPhase::Configure => Ok(&mut self.config),
            StudioPhase::Review => Err(StudioError::WrongPhase {
                phase: StudioPhase::Review,
            }),
        }
    }

    /// Switches the active strategy, preserving all parameters.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::WrongPhase`] outside the configure phase.
    pub fn switch_strategy(&mut self, kind: RuleKind) -> Result<(), StudioError> {
        self.config_mut()?.switch_to(kind);
        Ok(())
    }

    /// Computes the live preview for the current configuration.
    ///
    /// Valid in any phase; the result is a fresh snapshot.
    #[must_use]
    pub fn preview(&self, resources: &[Resource]) -> Preview {
        build_preview(resources, &self.config.active_rule())
    }

    /// Advances to review, freezing the preview.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::WrongPhase`] outside the configure phase,
    /// [`StudioError::InvalidConfig`] when the active rule is incomplete, and
    /// [`StudioError::EmptyPreview`] when no resource has an applicable
    /// change. Config validity alone never enables review.
    pub fn begin_review(&mut self, resources: &[Resource]) -> Result<&Preview, StudioError> {
        if self.phase != StudioPhase::Configure {
            return Err(StudioError::WrongPhase {
                phase: self.phase,
            });
        }
        let rule = self.config.active_rule();
        if !rule.is_valid() {
            return Err(StudioError::InvalidConfig);
        }
        let preview = build_preview(resources, &rule);
        if preview.is_empty() {
            return Err(StudioError::EmptyPreview);
        }
        self.reviewed = preview;
        self.phase = StudioPhase::Review;
        Ok(&self.reviewed)
    }

    /// Returns the frozen preview while in review.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::WrongPhase`] outside the review phase.
    pub fn reviewed(&self) -> Result<&Preview, StudioError> {
        match self.phase {
            StudioPhase::Review => Ok(&self.reviewed),
            StudioPhase::Configure => Err(StudioError::WrongPhase {
                phase: StudioPhase::Configure,
            }),
        }
    }

    /// Returns from review to configure, preserving all parameters.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::WrongPhase`] outside the review phase.
    pub fn back(&mut self) -> Result<(), StudioError> {
        if self.phase != StudioPhase::Review {
            return Err(StudioError::WrongPhase {
                phase: self.phase,
            });
        }
        self.phase = StudioPhase::Configure;
        self.reviewed = Preview::new();
        Ok(())
    }

    /// Commits the reviewed preview, consuming the session.
    ///
    /// Returns the terminal label maps for the external apply-layer. There is
    /// no in-core retry or rollback.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::WrongPhase`] outside the review phase.
    pub fn commit(self) -> Result<ApplySet, StudioError> {
        match self.phase {
            StudioPhase::Review => Ok(apply_preview(&self.reviewed)),
            StudioPhase::Configure => Err(StudioError::WrongPhase {
                phase: StudioPhase::Configure,
            }),
        }
    }
}
