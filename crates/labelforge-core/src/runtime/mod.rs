// crates/labelforge-core/src/runtime/mod.rs
// ============================================================================
// Module: Labelforge Runtime
// Description: Pure engines for label diffing, preview, and compliance.
// Purpose: Provide the synchronous, re-entrant computation layer.
// Dependencies: crate::core, regex, thiserror
// ============================================================================

//! ## Overview
//! The runtime holds the pure engines: per-resource label diffing under an
//! extraction rule, fleet-wide preview aggregation with the two-step commit
//! session, and policy compliance evaluation. Everything here is
//! synchronous, side-effect-free, and safe to re-run on every input change;
//! callers own memoization policy.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod compliance;
pub mod diff;
pub mod preview;
pub mod strategy;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use compliance::FleetReport;
pub use compliance::evaluate_fleet;
pub use compliance::evaluate_resource;
pub use diff::LabelDelta;
pub use diff::compute_label_delta;
pub use preview::ApplySet;
pub use preview::Preview;
pub use preview::PreviewEntry;
pub use preview::StudioError;
pub use preview::StudioPhase;
pub use preview::StudioSession;
pub use preview::apply_preview;
pub use preview::build_preview;
pub use strategy::ExtractionRule;
pub use strategy::GroupMapping;
pub use strategy::LabelPair;
pub use strategy::PositionMapping;
pub use strategy::RuleKind;
pub use strategy::StudioConfig;
pub use strategy::ValueRewrite;
