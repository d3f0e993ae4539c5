// crates/labelforge-core/src/runtime/diff.rs
// ============================================================================
// Module: Labelforge Label Diff Engine
// Description: Per-resource label delta computation for extraction rules.
// Purpose: Compute final label sets and change lists without mutating input.
// Dependencies: crate::core, crate::runtime::strategy, regex
// ============================================================================

//! ## Overview
//! The diff engine applies one extraction rule to one resource snapshot and
//! returns the resulting label map plus a structured change list. It is a
//! pure function: the source resource is never mutated, repeated calls on the
//! same snapshot are bit-identical, and malformed strategy input (invalid
//! regex, out-of-bounds position, blank key) contributes no change instead of
//! erroring. The preview pipeline re-runs this on every keystroke, so
//! non-crash degradation is a hard requirement.

// ============================================================================
// SECTION: Imports
// ============================================================================

use regex::Regex;
use serde::Deserialize;
use serde::Serialize;

use crate::core::change::ChangeRecord;
use crate::core::change::diff_labels;
use crate::core::resource::LabelMap;
use crate::core::resource::Resource;
use crate::runtime::strategy::ExtractionRule;
use crate::runtime::strategy::GroupMapping;
use crate::runtime::strategy::PositionMapping;
use crate::runtime::strategy::ValueRewrite;
use crate::runtime::strategy::is_blank;

// ============================================================================
// SECTION: Label Delta
// ============================================================================

/// Result of applying one extraction rule to one resource.
///
/// # Invariants
/// - `changes` equals `diff_labels(&resource.labels, &final_labels)`.
/// - Feeding `final_labels` back as the resource's labels yields an empty
///   change list (idempotence).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelDelta {
    /// Label map after applying the rule.
    pub final_labels: LabelMap,
    /// Structured change list, sorted by key.
    pub changes: Vec<ChangeRecord>,
}

impl LabelDelta {
    /// Returns true when the rule produced no applicable changes.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.changes.is_empty()
    }
}

// ============================================================================
// SECTION: Delta Computation
// ============================================================================

/// Computes the label delta for a resource under an extraction rule.
///
/// Never mutates the resource. Blank keys or values are skipped, assignments
/// equal to the current value short-circuit to no change, and strategy input
/// that cannot apply (invalid regex, missing token, absent key) contributes
/// nothing.
#[must_use]
pub fn compute_label_delta(resource: &Resource, rule: &ExtractionRule) -> LabelDelta {
    let mut final_labels = resource.labels.clone();
    match rule {
        ExtractionRule::Static {
            pairs,
        } => {
            for pair in pairs {
                assign(&mut final_labels, &pair.key, &pair.value);
            }
        }
        ExtractionRule::Pattern {
            delimiter,
            mappings,
        } => {
            apply_pattern(&mut final_labels, &resource.name, delimiter, mappings);
        }
        ExtractionRule::Regex {
            pattern,
            groups,
        } => {
            apply_regex(&mut final_labels, &resource.name, pattern, groups);
        }
        ExtractionRule::Normalization {
            rules,
        } => {
            apply_normalization(&mut final_labels, &resource.labels, rules);
        }
        ExtractionRule::Cleanup {
            keys,
        } => {
            for key in keys {
                if !is_blank(key) {
                    final_labels.remove(key);
                }
            }
        }
    }
    let changes = diff_labels(&resource.labels, &final_labels);
    LabelDelta {
        final_labels,
        changes,
    }
}

/// Assigns a value to a key, skipping blank input and unchanged values.
fn assign(labels: &mut LabelMap, key: &str, value: &str) {
    if is_blank(key) || is_blank(value) {
        return;
    }
    if labels.get(key).is_some_and(|current| current == value) {
        return;
    }
    labels.insert(key.to_owned(), value.to_owned());
}

/// Applies delimiter-split positional mappings to the label map.
///
/// The delimiter is a literal string, never a regex. Token positions are
/// zero-indexed; out-of-bounds positions are silently skipped.
fn apply_pattern(
    labels: &mut LabelMap,
    name: &str,
    delimiter: &str,
    mappings: &[PositionMapping],
) {
    if delimiter.is_empty() {
        return;
    }
    let tokens: Vec<&str> = name.split(delimiter).collect();
    for mapping in mappings {
        if is_blank(&mapping.key) {
            continue;
        }
        if let Some(token) = tokens.get(mapping.position) {
            assign(labels, &mapping.key, token);
        }
    }
}

/// Applies regex capture-group mappings to the label map.
///
/// A pattern that fails to compile degrades to "no matches produced" so the
/// preview stays responsive while the user is still typing. The name is
/// matched once (not globally); group index 0 is the whole match, and groups
/// that did not participate in the match are skipped.
fn apply_regex(
    labels: &mut LabelMap,
    name: &str,
    pattern: &str,
    groups: &[GroupMapping],
) {
    let Ok(compiled) = Regex::new(pattern) else {
        return;
    };
    let Some(captures) = compiled.captures(name) else {
        return;
    };
    for group in groups {
        if is_blank(&group.key) {
            continue;
        }
        if let Some(matched) = captures.get(group.index) {
            assign(labels, &group.key, matched.as_str());
        }
    }
}

/// Rewrites label values by exact whole-value match.
///
/// Each label is checked independently; labels sharing a value are each
/// rewritten. Inert rules (blank `to`, or `to` equal to the value) are
/// skipped entirely, so they never shadow a later effective rule for the
/// same source value; the first effective rule wins.
fn apply_normalization(
    labels: &mut LabelMap,
    original: &LabelMap,
    rules: &[ValueRewrite],
) {
    for (key, value) in original {
        let replacement = rules
            .iter()
            .find(|rule| &rule.from == value && !is_blank(&rule.to) && rule.to != *value)
            .map(|rule| rule.to.as_str());
        if let Some(to) = replacement {
            labels.insert(key.clone(), to.to_owned());
        }
    }
}
