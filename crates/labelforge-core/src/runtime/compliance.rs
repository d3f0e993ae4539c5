// crates/labelforge-core/src/runtime/compliance.rs
// ============================================================================
// Module: Labelforge Compliance Engine
// Description: Policy evaluation for resources and fleet-wide aggregation.
// Purpose: Classify resources against enabled policies and score the fleet.
// Dependencies: crate::core, regex
// ============================================================================

//! ## Overview
//! The compliance engine evaluates enabled governance policies against
//! resource snapshots. Each failing enabled policy yields one violation;
//! violations are never deduplicated by category. A name-regex policy whose
//! pattern fails to compile is treated as inactive: it contributes no
//! violations and is surfaced in the fleet report for the UI, never as a
//! crash.
//!
//! Note the deliberate asymmetry: an allowed-values rule treats an absent
//! key as compliant, while a required-label rule treats it as violating.
//! A resource lacking the key entirely evades the allowed-values check
//! unless a required-label policy covers the same key.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use regex::Regex;
use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::PolicyId;
use crate::core::policy::PolicySet;
use crate::core::policy::RuleSpec;
use crate::core::policy::Violation;
use crate::core::resource::Resource;

// ============================================================================
// SECTION: Rule Evaluation
// ============================================================================

/// Outcome of evaluating one rule against one resource.
enum RuleOutcome {
    /// Resource satisfies the rule.
    Pass,
    /// Resource violates the rule with the given message.
    Fail(String),
    /// Rule cannot be evaluated (invalid pattern) and is inactive.
    Inactive,
}

/// Evaluates one rule specification against a resource.
fn evaluate_rule(resource: &Resource, rule: &RuleSpec) -> RuleOutcome {
    match rule {
        RuleSpec::RequiredLabel {
            key,
        } => {
            if resource.labels.contains_key(key) {
                RuleOutcome::Pass
            } else {
                RuleOutcome::Fail(format!("missing required label '{key}'"))
            }
        }
        RuleSpec::AllowedValues {
            key,
            values,
        } => match resource.labels.get(key) {
            // Absence is compliant for this rule; only a wrong value fails.
            None => RuleOutcome::Pass,
            Some(value) if values.contains(value) => RuleOutcome::Pass,
            Some(value) => {
                RuleOutcome::Fail(format!("label '{key}' has disallowed value '{value}'"))
            }
        },
        RuleSpec::NameRegex {
            pattern,
        } => match Regex::new(pattern) {
            Err(_) => RuleOutcome::Inactive,
            Ok(compiled) if compiled.is_match(&resource.name) => RuleOutcome::Pass,
            Ok(_) => {
                RuleOutcome::Fail(format!("name '{}' does not match '{pattern}'", resource.name))
            }
        },
        RuleSpec::RegionRestriction {
            prefixes,
        } => {
            if prefixes.iter().any(|prefix| resource.zone.starts_with(prefix)) {
                RuleOutcome::Pass
            } else {
                RuleOutcome::Fail(format!("zone '{}' is outside the allowed regions", resource.zone))
            }
        }
    }
}

// ============================================================================
// SECTION: Resource Evaluation
// ============================================================================

/// Evaluates all enabled policies against one resource.
///
/// Returns one violation per failing enabled policy. Disabled policies and
/// policies with uncompilable patterns contribute nothing.
#[must_use]
pub fn evaluate_resource(resource: &Resource, policies: &PolicySet) -> Vec<Violation> {
    let mut violations = Vec::new();
    for policy in policies.enabled() {
        if let RuleOutcome::Fail(message) = evaluate_rule(resource, &policy.rule) {
            violations.push(Violation {
                policy_id: policy.id.clone(),
                message,
            });
        }
    }
    violations
}

// ============================================================================
// SECTION: Fleet Aggregation
// ============================================================================

/// Fleet-wide compliance statistics.
///
/// # Invariants
/// - `score` is in `0..=100`; an empty fleet scores 100.
/// - `compliant + violated == total`.
/// - `inactive_policies` is a UI surface for unevaluable rules; those
///   policies never appear in any violation list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetReport {
    /// Rounded percentage of resources with zero violations.
    pub score: u8,
    /// Total resources evaluated.
    pub total: u64,
    /// Resources with zero violations.
    pub compliant: u64,
    /// Resources with at least one violation.
    pub violated: u64,
    /// Violation counts per policy category string.
    pub by_category: BTreeMap<String, u64>,
    /// Enabled policies that could not be evaluated (invalid pattern).
    pub inactive_policies: Vec<PolicyId>,
}

/// Returns the enabled policies whose rules cannot be evaluated.
fn inactive_policy_ids(policies: &PolicySet) -> Vec<PolicyId> {
    policies
        .enabled()
        .filter(|policy| {
            matches!(
                &policy.rule,
                RuleSpec::NameRegex { pattern } if Regex::new(pattern).is_err()
            )
        })
        .map(|policy| policy.id.clone())
        .collect()
}

/// Evaluates the whole fleet and aggregates compliance statistics.
///
/// Score is `round(100 * compliant / total)`; an empty fleet is defined as
/// fully compliant (score 100) rather than a division error.
#[must_use]
pub fn evaluate_fleet(resources: &[Resource], policies: &PolicySet) -> FleetReport {
    let mut compliant: u64 = 0;
    let mut violated: u64 = 0;
    let mut by_category: BTreeMap<String, u64> = BTreeMap::new();

    for resource in resources {
        let violations = evaluate_resource(resource, policies);
        if violations.is_empty() {
            compliant += 1;
        } else {
            violated += 1;
        }
        for violation in &violations {
            if let Some(policy) = policies.get(&violation.policy_id) {
                *by_category.entry(policy.category.as_str().to_owned()).or_insert(0) += 1;
            }
        }
    }

    let total = compliant + violated;
    let score = if total == 0 {
        100
    } else {
        let scaled = compliant * 100 + total / 2;
        u8::try_from(scaled / total).unwrap_or(100)
    };

    FleetReport {
        score,
        total,
        compliant,
        violated,
        by_category,
        inactive_policies: inactive_policy_ids(policies),
    }
}
