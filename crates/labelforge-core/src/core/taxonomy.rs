// crates/labelforge-core/src/core/taxonomy.rs
// ============================================================================
// Module: Labelforge Taxonomy
// Description: Organizational label taxonomy and built-in policy derivation.
// Purpose: Derive the default governance policy set from expected label keys.
// Dependencies: crate::core::{identifiers, policy}, serde
// ============================================================================

//! ## Overview
//! The taxonomy is the organization-defined set of expected label keys and
//! values. At initialization it is projected into built-in policies: one
//! required-label policy per required key and one allowed-values policy per
//! key with a constrained value set. Derived policy identifiers are
//! deterministic so repeated derivation is stable across runs.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::PolicyId;
use crate::core::policy::GovernancePolicy;
use crate::core::policy::PolicyCategory;
use crate::core::policy::RuleSpec;
use crate::core::policy::Severity;

// ============================================================================
// SECTION: Taxonomy Model
// ============================================================================

/// One expected label key in the organizational taxonomy.
///
/// # Invariants
/// - `key` is unique within a taxonomy.
/// - An empty `allowed_values` means the key accepts any value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyKey {
    /// Expected label key.
    pub key: String,
    /// Human-readable purpose of the key.
    pub description: String,
    /// Whether every resource must carry the key.
    pub required: bool,
    /// Permitted values; empty means unconstrained.
    #[serde(default)]
    pub allowed_values: Vec<String>,
}

/// Organization-defined label taxonomy.
///
/// # Invariants
/// - Keys are unique; derivation keeps the first occurrence of a duplicate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxonomy {
    /// Expected label keys in declaration order.
    pub keys: Vec<TaxonomyKey>,
}

// ============================================================================
// SECTION: Policy Derivation
// ============================================================================

/// Identifier prefix for derived required-label policies.
const REQUIRED_LABEL_ID_PREFIX: &str = "required-label:";

/// Identifier prefix for derived allowed-values policies.
const ALLOWED_VALUES_ID_PREFIX: &str = "allowed-values:";

/// Derives the built-in policy set from a taxonomy.
///
/// Per key: a required-label policy when `required` is set, and an
/// allowed-values policy when `allowed_values` is non-empty. Derived policies
/// are enabled, non-custom, category `OPERATIONS`, severity `Warning`, and
/// carry deterministic identifiers (`required-label:<key>`,
/// `allowed-values:<key>`).
#[must_use]
pub fn derive_policies(taxonomy: &Taxonomy) -> Vec<GovernancePolicy> {
    let mut policies = Vec::new();
    let mut seen = Vec::new();
    for entry in &taxonomy.keys {
        if seen.contains(&entry.key.as_str()) {
            continue;
        }
        seen.push(entry.key.as_str());
        if entry.required {
            policies.push(GovernancePolicy {
                id: PolicyId::new(format!("{REQUIRED_LABEL_ID_PREFIX}{}", entry.key)),
                name: format!("Require label '{}'", entry.key),
                description: entry.description.clone(),
                category: PolicyCategory::new(PolicyCategory::OPERATIONS),
                severity: Severity::Warning,
                enabled: true,
                custom: false,
                rule: RuleSpec::RequiredLabel {
                    key: entry.key.clone(),
                },
            });
        }
        if !entry.allowed_values.is_empty() {
            policies.push(GovernancePolicy {
                id: PolicyId::new(format!("{ALLOWED_VALUES_ID_PREFIX}{}", entry.key)),
                name: format!("Allowed values for '{}'", entry.key),
                description: entry.description.clone(),
                category: PolicyCategory::new(PolicyCategory::OPERATIONS),
                severity: Severity::Warning,
                enabled: true,
                custom: false,
                rule: RuleSpec::AllowedValues {
                    key: entry.key.clone(),
                    values: entry.allowed_values.clone(),
                },
            });
        }
    }
    policies
}
