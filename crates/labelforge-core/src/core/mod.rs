// crates/labelforge-core/src/core/mod.rs
// ============================================================================
// Module: Labelforge Core Model
// Description: Canonical data model for resources, labels, and policies.
// Purpose: Provide the immutable types consumed by the runtime engines.
// Dependencies: serde, serde_jcs, sha2, time
// ============================================================================

//! ## Overview
//! The core model holds the data shapes everything else consumes: resource
//! snapshots, label change records, governance policies, the taxonomy, audit
//! history records, canonical hashing, and the timestamp model. No engine
//! logic lives here.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod change;
pub mod hashing;
pub mod history;
pub mod identifiers;
pub mod policy;
pub mod resource;
pub mod taxonomy;
pub mod time;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use change::ChangeKind;
pub use change::ChangeRecord;
pub use change::diff_labels;
pub use hashing::HashAlgorithm;
pub use hashing::HashDigest;
pub use hashing::HashError;
pub use history::HistoryEntry;
pub use identifiers::PolicyId;
pub use identifiers::ResourceId;
pub use policy::GovernancePolicy;
pub use policy::PolicyCategory;
pub use policy::PolicySet;
pub use policy::RuleSpec;
pub use policy::Severity;
pub use policy::Violation;
pub use resource::LabelMap;
pub use resource::Resource;
pub use resource::ResourceKind;
pub use resource::ResourceStatus;
pub use taxonomy::Taxonomy;
pub use taxonomy::TaxonomyKey;
pub use taxonomy::derive_policies;
pub use time::Timestamp;
