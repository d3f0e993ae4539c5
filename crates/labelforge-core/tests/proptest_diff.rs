// crates/labelforge-core/tests/proptest_diff.rs
// ============================================================================
// Module: Diff Engine Property-Based Tests
// Description: Property tests for delta purity, idempotence, and consistency.
// Purpose: Detect panics and invariant drift across wide input ranges.
// ============================================================================

//! Property-based tests for label diff invariants.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use labelforge_core::ChangeKind;
use labelforge_core::ExtractionRule;
use labelforge_core::GroupMapping;
use labelforge_core::LabelMap;
use labelforge_core::LabelPair;
use labelforge_core::PositionMapping;
use labelforge_core::Resource;
use labelforge_core::ResourceKind;
use labelforge_core::ResourceStatus;
use labelforge_core::ValueRewrite;
use labelforge_core::compute_label_delta;
use labelforge_core::diff_labels;
use proptest::prelude::*;

/// Strategy for label maps with short lowercase keys and values.
fn label_map_strategy() -> impl Strategy<Value = LabelMap> {
    prop::collection::btree_map("[a-z]{1,6}", "[a-z0-9]{0,6}", 0 .. 6)
}

/// Strategy over all five extraction rule variants.
fn rule_strategy() -> impl Strategy<Value = ExtractionRule> {
    prop_oneof![
        prop::collection::vec(("[a-z]{0,5}", "[a-z0-9]{0,5}"), 0 .. 4).prop_map(|pairs| {
            ExtractionRule::Static {
                pairs: pairs
                    .into_iter()
                    .map(|(key, value)| LabelPair {
                        key,
                        value,
                    })
                    .collect(),
            }
        }),
        ("[-._]{1}", prop::collection::vec((0_usize .. 8, "[a-z]{0,5}"), 0 .. 4)).prop_map(
            |(delimiter, mappings)| ExtractionRule::Pattern {
                delimiter,
                mappings: mappings
                    .into_iter()
                    .map(|(position, key)| PositionMapping {
                        position,
                        key,
                    })
                    .collect(),
            }
        ),
        (".{0,12}", prop::collection::vec((0_usize .. 4, "[a-z]{0,5}"), 0 .. 4)).prop_map(
            |(pattern, groups)| ExtractionRule::Regex {
                pattern,
                groups: groups
                    .into_iter()
                    .map(|(index, key)| GroupMapping {
                        index,
                        key,
                    })
                    .collect(),
            }
        ),
        // Sources and targets draw from disjoint alphabets so rewrites never
        // chain; chained rule sets are not idempotent by construction.
        prop::collection::vec(("[a-m]{0,5}", "[n-z]{0,5}"), 0 .. 4).prop_map(|rules| {
            ExtractionRule::Normalization {
                rules: rules
                    .into_iter()
                    .map(|(from, to)| ValueRewrite {
                        from,
                        to,
                    })
                    .collect(),
            }
        }),
        prop::collection::vec("[a-z]{0,6}", 0 .. 4).prop_map(|keys| ExtractionRule::Cleanup {
            keys,
        }),
    ]
}

/// Builds a resource from a name and label map.
fn resource_from(name: String, labels: LabelMap) -> Resource {
    let mut resource = Resource::new(
        "res-prop",
        name,
        ResourceKind::Instance,
        "us-central1-a",
        ResourceStatus::Running,
    );
    resource.labels = labels;
    resource
}

proptest! {
    #[test]
    fn delta_never_panics_and_never_mutates(
        name in ".{0,16}",
        labels in label_map_strategy(),
        rule in rule_strategy(),
    ) {
        let resource = resource_from(name, labels.clone());
        let _delta = compute_label_delta(&resource, &rule);
        prop_assert_eq!(&resource.labels, &labels);
    }

    #[test]
    fn delta_is_idempotent(
        name in ".{0,16}",
        labels in label_map_strategy(),
        rule in rule_strategy(),
    ) {
        let resource = resource_from(name, labels);
        let first = compute_label_delta(&resource, &rule);
        let mut settled = resource.clone();
        settled.labels = first.final_labels.clone();
        let second = compute_label_delta(&settled, &rule);
        prop_assert!(second.changes.is_empty());
        prop_assert_eq!(second.final_labels, first.final_labels);
    }

    #[test]
    fn changes_match_map_diff(
        name in ".{0,16}",
        labels in label_map_strategy(),
        rule in rule_strategy(),
    ) {
        let resource = resource_from(name, labels);
        let delta = compute_label_delta(&resource, &rule);
        let recomputed = diff_labels(&resource.labels, &delta.final_labels);
        prop_assert_eq!(&delta.changes, &recomputed);
    }

    #[test]
    fn replaying_changes_reconstructs_the_final_map(
        name in ".{0,16}",
        labels in label_map_strategy(),
        rule in rule_strategy(),
    ) {
        let resource = resource_from(name, labels);
        let delta = compute_label_delta(&resource, &rule);
        let mut replayed = resource.labels.clone();
        for change in &delta.changes {
            match change.kind {
                ChangeKind::Delete => {
                    replayed.remove(&change.key);
                }
                ChangeKind::Add | ChangeKind::Modify => {
                    if let Some(value) = &change.new_value {
                        replayed.insert(change.key.clone(), value.clone());
                    }
                }
            }
        }
        prop_assert_eq!(replayed, delta.final_labels);
    }

    #[test]
    fn map_diff_of_identical_maps_is_empty(labels in label_map_strategy()) {
        prop_assert!(diff_labels(&labels, &labels).is_empty());
    }
}
