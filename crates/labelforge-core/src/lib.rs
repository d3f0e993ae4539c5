// crates/labelforge-core/src/lib.rs
// ============================================================================
// Module: Labelforge Core
// Description: Label transformation and policy compliance engines.
// Purpose: Provide the pure computation core behind the labeling studio.
// Dependencies: regex, serde, serde_jcs, sha2, thiserror, time
// ============================================================================

//! ## Overview
//! Labelforge Core is the rule-driven engine behind a cloud resource
//! governance console: it computes, previews, and commits bulk label
//! mutations across heterogeneous resource sets using five interchangeable
//! extraction strategies, and classifies resources against a configurable
//! policy taxonomy.
//!
//! The core is single-threaded, synchronous, and pure: every computation
//! consumes an immutable snapshot and produces a new output snapshot, so it
//! is safe to re-run on every keystroke. Persistence, authentication, and
//! provider transport are external collaborators reached through the
//! [`interfaces`] seams; the core functions correctly when they are absent,
//! slow, or failing.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use self::core::ChangeKind;
pub use self::core::ChangeRecord;
pub use self::core::GovernancePolicy;
pub use self::core::HashAlgorithm;
pub use self::core::HashDigest;
pub use self::core::HashError;
pub use self::core::HistoryEntry;
pub use self::core::LabelMap;
pub use self::core::PolicyCategory;
pub use self::core::PolicyId;
pub use self::core::PolicySet;
pub use self::core::Resource;
pub use self::core::ResourceId;
pub use self::core::ResourceKind;
pub use self::core::ResourceStatus;
pub use self::core::RuleSpec;
pub use self::core::Severity;
pub use self::core::Taxonomy;
pub use self::core::TaxonomyKey;
pub use self::core::Timestamp;
pub use self::core::Violation;
pub use self::core::derive_policies;
pub use self::core::diff_labels;
pub use interfaces::ApplyError;
pub use interfaces::ApplyReceipt;
pub use interfaces::AuditSink;
pub use interfaces::LabelApplier;
pub use interfaces::LabelConstraintError;
pub use interfaces::validate_label_key;
pub use interfaces::validate_label_map;
pub use interfaces::validate_label_value;
pub use runtime::ApplySet;
pub use runtime::ExtractionRule;
pub use runtime::FleetReport;
pub use runtime::GroupMapping;
pub use runtime::LabelDelta;
pub use runtime::LabelPair;
pub use runtime::PositionMapping;
pub use runtime::Preview;
pub use runtime::PreviewEntry;
pub use runtime::RuleKind;
pub use runtime::StudioConfig;
pub use runtime::StudioError;
pub use runtime::StudioPhase;
pub use runtime::StudioSession;
pub use runtime::ValueRewrite;
pub use runtime::apply_preview;
pub use runtime::build_preview;
pub use runtime::compute_label_delta;
pub use runtime::evaluate_fleet;
pub use runtime::evaluate_resource;
