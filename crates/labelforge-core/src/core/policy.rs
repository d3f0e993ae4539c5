// crates/labelforge-core/src/core/policy.rs
// ============================================================================
// Module: Labelforge Governance Policies
// Description: Policy records, rule specifications, and violation records.
// Purpose: Define the rule taxonomy evaluated by the compliance engine.
// Dependencies: crate::core::identifiers, serde
// ============================================================================

//! ## Overview
//! A [`GovernancePolicy`] binds one [`RuleSpec`] to identity, category,
//! severity, and lifecycle flags. Built-in policies are derived from the
//! taxonomy at initialization; custom policies are user-authored and
//! independently editable and deletable. Policies are never auto-deleted.
//!
//! Categories are an open string set at the model level: `SECURITY`, `COST`,
//! and `OPERATIONS` are provided defaults only, and custom category strings
//! are permitted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::PolicyId;

// ============================================================================
// SECTION: Severity and Category
// ============================================================================

/// Policy severity levels.
///
/// # Invariants
/// - Variants are stable for serialization and dashboard ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational finding.
    Info,
    /// Warning-level finding.
    Warning,
    /// Medium-impact finding.
    Medium,
    /// Critical finding.
    Critical,
}

/// Open policy category string.
///
/// # Invariants
/// - Opaque UTF-8 string; the default categories are conventions, not a
///   closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolicyCategory(String);

impl PolicyCategory {
    /// Default category for security-sensitive policies.
    pub const SECURITY: &'static str = "SECURITY";
    /// Default category for cost-attribution policies.
    pub const COST: &'static str = "COST";
    /// Default category for operational hygiene policies.
    pub const OPERATIONS: &'static str = "OPERATIONS";

    /// Creates a category from any string.
    #[must_use]
    pub fn new(category: impl Into<String>) -> Self {
        Self(category.into())
    }

    /// Returns the category as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PolicyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for PolicyCategory {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PolicyCategory {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// SECTION: Rule Specifications
// ============================================================================

/// Rule specification evaluated against a resource.
///
/// # Invariants
/// - Variants are stable for serialization and contract matching.
/// - Rule parameters are opaque to this type; semantics live in the
///   compliance engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleSpec {
    /// Violation iff `key` is absent from the resource labels.
    RequiredLabel {
        /// Label key that must be present.
        key: String,
    },
    /// Violation iff `key` is present with a value outside `values`.
    ///
    /// Absence of the key is compliant for this rule; only a wrong value
    /// violates. Pairing with a `RequiredLabel` rule on the same key closes
    /// the gap when absence should also be flagged.
    AllowedValues {
        /// Label key whose value is constrained.
        key: String,
        /// Permitted values for the key.
        values: Vec<String>,
    },
    /// Violation iff the resource name does not match `pattern`.
    ///
    /// An invalid pattern disables the rule instead of crashing evaluation.
    NameRegex {
        /// Regular expression the resource name must match.
        pattern: String,
    },
    /// Violation iff no allowed prefix is a prefix of the resource zone.
    RegionRestriction {
        /// Permitted zone/region prefixes.
        prefixes: Vec<String>,
    },
}

// ============================================================================
// SECTION: Governance Policy
// ============================================================================

/// A single governance policy in the organizational rule set.
///
/// # Invariants
/// - `id` is unique within a [`PolicySet`].
/// - `custom` distinguishes user-authored policies from taxonomy-derived
///   built-ins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernancePolicy {
    /// Policy identifier.
    pub id: PolicyId,
    /// Display name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Open category string.
    pub category: PolicyCategory,
    /// Severity level.
    pub severity: Severity,
    /// Whether the policy participates in evaluation.
    pub enabled: bool,
    /// Whether the policy is user-authored rather than taxonomy-derived.
    pub custom: bool,
    /// Rule evaluated against each resource.
    pub rule: RuleSpec,
}

// ============================================================================
// SECTION: Violations
// ============================================================================

/// One resource failing one enabled policy.
///
/// # Invariants
/// - Violations are recomputed on demand, never persisted as source of truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Policy that produced the violation.
    pub policy_id: PolicyId,
    /// Human-readable violation message.
    pub message: String,
}

// ============================================================================
// SECTION: Policy Set
// ============================================================================

/// Ordered collection of governance policies with lifecycle operations.
///
/// # Invariants
/// - Policy identifiers are unique; upsert replaces by identifier.
/// - Policies are removed only by explicit request, never automatically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolicySet {
    /// Policies in insertion order.
    policies: Vec<GovernancePolicy>,
}

impl PolicySet {
    /// Creates an empty policy set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            policies: Vec::new(),
        }
    }

    /// Creates a set from existing policies, keeping the first of any
    /// duplicate identifier.
    #[must_use]
    pub fn from_policies(policies: Vec<GovernancePolicy>) -> Self {
        let mut set = Self::new();
        for policy in policies {
            if set.get(&policy.id).is_none() {
                set.policies.push(policy);
            }
        }
        set
    }

    /// Returns the policies in insertion order.
    #[must_use]
    pub fn policies(&self) -> &[GovernancePolicy] {
        &self.policies
    }

    /// Returns the number of policies in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.policies.len()
    }

    /// Returns true when the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    /// Looks up a policy by identifier.
    #[must_use]
    pub fn get(&self, id: &PolicyId) -> Option<&GovernancePolicy> {
        self.policies.iter().find(|policy| &policy.id == id)
    }

    /// Inserts or replaces a policy by identifier, preserving position on
    /// replacement.
    pub fn upsert(&mut self, policy: GovernancePolicy) {
        if let Some(slot) = self.policies.iter_mut().find(|existing| existing.id == policy.id) {
            *slot = policy;
        } else {
            self.policies.push(policy);
        }
    }

    /// Toggles the enabled flag of a policy; returns the new state.
    ///
    /// Returns `None` when no policy has the identifier.
    pub fn toggle(&mut self, id: &PolicyId) -> Option<bool> {
        let policy = self.policies.iter_mut().find(|policy| &policy.id == id)?;
        policy.enabled = !policy.enabled;
        Some(policy.enabled)
    }

    /// Removes a policy by identifier; returns the removed policy.
    pub fn remove(&mut self, id: &PolicyId) -> Option<GovernancePolicy> {
        let index = self.policies.iter().position(|policy| &policy.id == id)?;
        Some(self.policies.remove(index))
    }

    /// Iterates over enabled policies only.
    pub fn enabled(&self) -> impl Iterator<Item = &GovernancePolicy> {
        self.policies.iter().filter(|policy| policy.enabled)
    }
}
