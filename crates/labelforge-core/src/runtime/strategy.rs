// crates/labelforge-core/src/runtime/strategy.rs
// ============================================================================
// Module: Labelforge Extraction Strategies
// Description: Strategy configuration for bulk label transformation.
// Purpose: Define the five interchangeable extraction rule variants.
// Dependencies: crate::core, serde
// ============================================================================

//! ## Overview
//! An [`ExtractionRule`] is the tagged union over the five extraction
//! strategies: static assignment, delimiter-based positional parsing,
//! regular-expression capture, value normalization, and key cleanup. Exactly
//! one variant is active per diff computation.
//!
//! [`StudioConfig`] keeps the parameters of all five variants alive with one
//! active [`RuleKind`], so switching strategies in the studio never loses the
//! inactive variants' parameters.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Strategy Parameters
// ============================================================================

/// One static key/value assignment.
///
/// # Invariants
/// - Blank keys or values make the pair inert; they never produce changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelPair {
    /// Label key to assign.
    pub key: String,
    /// Value to assign.
    pub value: String,
}

/// Maps a zero-indexed name token to a label key.
///
/// # Invariants
/// - Out-of-bounds positions are silently skipped at evaluation time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionMapping {
    /// Zero-indexed token position in the split name.
    pub position: usize,
    /// Label key receiving the token.
    pub key: String,
}

/// Maps a regex capture group index to a label key.
///
/// # Invariants
/// - Index 0 is the whole match; indices 1..n are capture groups in
///   declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMapping {
    /// Capture group index.
    pub index: usize,
    /// Label key receiving the captured text.
    pub key: String,
}

/// One exact-value rewrite rule.
///
/// # Invariants
/// - Matching is whole-value equality against `from`, never substring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueRewrite {
    /// Existing value to match exactly.
    pub from: String,
    /// Replacement value.
    pub to: String,
}

// ============================================================================
// SECTION: Extraction Rule
// ============================================================================

/// Tagged union over the five extraction strategies.
///
/// # Invariants
/// - Exactly one variant is active per diff computation.
/// - Variants are stable for serialization and studio round-trips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExtractionRule {
    /// Assign fixed key/value pairs.
    Static {
        /// Pairs to assign.
        pairs: Vec<LabelPair>,
    },
    /// Split the resource name on a literal delimiter and map token
    /// positions to keys.
    Pattern {
        /// Literal delimiter string (not a regex).
        delimiter: String,
        /// Position-to-key mappings.
        mappings: Vec<PositionMapping>,
    },
    /// Match the resource name against a regular expression and map capture
    /// groups to keys.
    Regex {
        /// Regular expression pattern.
        pattern: String,
        /// Group-to-key mappings.
        groups: Vec<GroupMapping>,
    },
    /// Rewrite existing label values by exact match.
    Normalization {
        /// Exact-value rewrite rules.
        rules: Vec<ValueRewrite>,
    },
    /// Remove the listed label keys where present.
    Cleanup {
        /// Keys to remove.
        keys: Vec<String>,
    },
}

/// Strategy discriminant without parameters.
///
/// # Invariants
/// - Variants correspond one-to-one with [`ExtractionRule`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// Static assignment.
    Static,
    /// Delimiter-based positional parsing.
    Pattern,
    /// Regular-expression capture.
    Regex,
    /// Value normalization.
    Normalization,
    /// Key cleanup.
    Cleanup,
}

/// Returns true when a string is empty or whitespace-only.
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

impl ExtractionRule {
    /// Returns the strategy discriminant.
    #[must_use]
    pub const fn kind(&self) -> RuleKind {
        match self {
            Self::Static { .. } => RuleKind::Static,
            Self::Pattern { .. } => RuleKind::Pattern,
            Self::Regex { .. } => RuleKind::Regex,
            Self::Normalization { .. } => RuleKind::Normalization,
            Self::Cleanup { .. } => RuleKind::Cleanup,
        }
    }

    /// Minimal-completeness check gating the commit action.
    ///
    /// Each variant requires at least one fully populated entry; blank keys
    /// or values never count. Validity alone does not enable commit: the
    /// computed preview must also be non-empty.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Static {
                pairs,
            } => pairs.iter().any(|pair| !is_blank(&pair.key) && !is_blank(&pair.value)),
            Self::Pattern {
                delimiter,
                mappings,
            } => !delimiter.is_empty() && mappings.iter().any(|mapping| !is_blank(&mapping.key)),
            Self::Regex {
                pattern,
                groups,
            } => !is_blank(pattern) && groups.iter().any(|group| !is_blank(&group.key)),
            Self::Normalization {
                rules,
            } => rules.iter().any(|rule| !is_blank(&rule.from) && !is_blank(&rule.to)),
            Self::Cleanup {
                keys,
            } => keys.iter().any(|key| !is_blank(key)),
        }
    }
}

// ============================================================================
// SECTION: Studio Configuration
// ============================================================================

/// Retained parameters for all five strategies with one active variant.
///
/// # Invariants
/// - Switching `active` never clears the parameters of inactive variants;
///   users can switch back without data loss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudioConfig {
    /// Currently active strategy.
    pub active: RuleKind,
    /// Static assignment pairs.
    #[serde(default)]
    pub static_pairs: Vec<LabelPair>,
    /// Pattern delimiter.
    #[serde(default)]
    pub pattern_delimiter: String,
    /// Pattern position mappings.
    #[serde(default)]
    pub pattern_mappings: Vec<PositionMapping>,
    /// Regex pattern.
    #[serde(default)]
    pub regex_pattern: String,
    /// Regex group mappings.
    #[serde(default)]
    pub regex_groups: Vec<GroupMapping>,
    /// Normalization rewrite rules.
    #[serde(default)]
    pub normalization_rules: Vec<ValueRewrite>,
    /// Cleanup key list.
    #[serde(default)]
    pub cleanup_keys: Vec<String>,
}

impl StudioConfig {
    /// Creates an empty configuration with the given active strategy.
    #[must_use]
    pub fn new(active: RuleKind) -> Self {
        Self {
            active,
            static_pairs: Vec::new(),
            pattern_delimiter: String::new(),
            pattern_mappings: Vec::new(),
            regex_pattern: String::new(),
            regex_groups: Vec::new(),
            normalization_rules: Vec::new(),
            cleanup_keys: Vec::new(),
        }
    }

    /// Switches the active strategy, keeping all parameters.
    pub const fn switch_to(&mut self, kind: RuleKind) {
        self.active = kind;
    }

    /// Projects the active variant into an [`ExtractionRule`].
    #[must_use]
    pub fn active_rule(&self) -> ExtractionRule {
        match self.active {
            RuleKind::Static => ExtractionRule::Static {
                pairs: self.static_pairs.clone(),
            },
            RuleKind::Pattern => ExtractionRule::Pattern {
                delimiter: self.pattern_delimiter.clone(),
                mappings: self.pattern_mappings.clone(),
            },
            RuleKind::Regex => ExtractionRule::Regex {
                pattern: self.regex_pattern.clone(),
                groups: self.regex_groups.clone(),
            },
            RuleKind::Normalization => ExtractionRule::Normalization {
                rules: self.normalization_rules.clone(),
            },
            RuleKind::Cleanup => ExtractionRule::Cleanup {
                keys: self.cleanup_keys.clone(),
            },
        }
    }
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self::new(RuleKind::Static)
    }
}
