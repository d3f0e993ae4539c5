// crates/labelforge-core/tests/diff_engine.rs
// ============================================================================
// Module: Label Diff Engine Tests
// Description: Validate delta computation purity, idempotence, and no-ops.
// Purpose: Ensure the diff engine never mutates input and converges.
// Dependencies: labelforge-core
// ============================================================================

//! Behavior tests for per-resource label delta computation.

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
use labelforge_core::LabelPair;
use labelforge_core::Resource;
use labelforge_core::ResourceKind;
use labelforge_core::ResourceStatus;
use labelforge_core::compute_label_delta;

/// Builds a resource with the given labels.
fn resource_with_labels(labels: &[(&str, &str)]) -> Resource {
    let mut resource = Resource::new(
        "res-1",
        "api-server-prod",
        ResourceKind::Instance,
        "us-central1-a",
        ResourceStatus::Running,
    );
    for (key, value) in labels {
        resource.labels.insert((*key).to_owned(), (*value).to_owned());
    }
    resource
}

/// Static rule assigning one pair.
fn static_rule(key: &str, value: &str) -> ExtractionRule {
    ExtractionRule::Static {
        pairs: vec![LabelPair {
            key: key.to_owned(),
            value: value.to_owned(),
        }],
    }
}

#[test]
fn delta_never_mutates_the_source_resource() {
    let resource = resource_with_labels(&[("env", "dev")]);
    let before = resource.clone();
    let delta = compute_label_delta(&resource, &static_rule("env", "prod"));
    assert_eq!(resource, before);
    assert_eq!(delta.final_labels.get("env").map(String::as_str), Some("prod"));
}

#[test]
fn delta_is_idempotent_when_fed_back() {
    let resource = resource_with_labels(&[("env", "dev")]);
    let rule = static_rule("env", "prod");
    let first = compute_label_delta(&resource, &rule);
    assert_eq!(first.changes.len(), 1);

    let mut settled = resource.clone();
    settled.labels = first.final_labels.clone();
    let second = compute_label_delta(&settled, &rule);
    assert!(second.changes.is_empty());
    assert_eq!(second.final_labels, first.final_labels);
}

#[test]
fn assigning_the_current_value_is_a_noop() {
    let resource = resource_with_labels(&[("env", "prod")]);
    let delta = compute_label_delta(&resource, &static_rule("env", "prod"));
    assert!(delta.changes.is_empty());
    assert!(delta.is_noop());
}

#[test]
fn blank_keys_and_values_assign_nothing() {
    let resource = resource_with_labels(&[("env", "prod")]);
    let rule = ExtractionRule::Static {
        pairs: vec![
            LabelPair {
                key: "   ".to_owned(),
                value: "x".to_owned(),
            },
            LabelPair {
                key: "team".to_owned(),
                value: "".to_owned(),
            },
        ],
    };
    let delta = compute_label_delta(&resource, &rule);
    assert!(delta.changes.is_empty());
    assert_eq!(delta.final_labels, resource.labels);
}

#[test]
fn repeated_calls_are_bit_identical() {
    let resource = resource_with_labels(&[("env", "dev"), ("team", "core")]);
    let rule = static_rule("env", "prod");
    let first = compute_label_delta(&resource, &rule);
    let second = compute_label_delta(&resource, &rule);
    assert_eq!(first, second);
}

#[test]
fn modification_reports_old_and_new_values() {
    let resource = resource_with_labels(&[("env", "dev")]);
    let delta = compute_label_delta(&resource, &static_rule("env", "prod"));
    let change = &delta.changes[0];
    assert_eq!(change.kind, ChangeKind::Modify);
    assert_eq!(change.old_value.as_deref(), Some("dev"));
    assert_eq!(change.new_value.as_deref(), Some("prod"));
}

#[test]
fn addition_reports_no_old_value() {
    let resource = resource_with_labels(&[]);
    let delta = compute_label_delta(&resource, &static_rule("owner", "platform"));
    let change = &delta.changes[0];
    assert_eq!(change.kind, ChangeKind::Add);
    assert_eq!(change.old_value, None);
    assert_eq!(change.new_value.as_deref(), Some("platform"));
}

#[test]
fn empty_string_value_is_distinct_from_absence() {
    let resource = resource_with_labels(&[("note", "")]);
    // Cleanup of the key is a real deletion even though the value is empty.
    let rule = ExtractionRule::Cleanup {
        keys: vec!["note".to_owned()],
    };
    let delta = compute_label_delta(&resource, &rule);
    assert_eq!(delta.changes.len(), 1);
    assert_eq!(delta.changes[0].kind, ChangeKind::Delete);
    assert_eq!(delta.changes[0].old_value.as_deref(), Some(""));
}
