// crates/labelforge-core/tests/constraints.rs
// ============================================================================
// Module: Label Constraint Tests
// Description: Validate provider label key/value/map constraint checks.
// Purpose: Ensure boundary validation surfaces every failure per field.
// ============================================================================

//! Behavior tests for provider label constraint validation.

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

use labelforge_core::LabelConstraintError;
use labelforge_core::LabelMap;
use labelforge_core::interfaces::MAX_LABELS_PER_RESOURCE;
use labelforge_core::validate_label_key;
use labelforge_core::validate_label_map;
use labelforge_core::validate_label_value;

#[test]
fn well_formed_keys_and_values_pass() {
    assert!(validate_label_key("env").is_ok());
    assert!(validate_label_key("cost-center_2").is_ok());
    assert!(validate_label_value("prod").is_ok());
}

#[test]
fn empty_values_are_legal_but_empty_keys_are_not() {
    assert!(validate_label_value("").is_ok());
    assert_eq!(validate_label_key(""), Err(LabelConstraintError::EmptyKey));
}

#[test]
fn overlong_keys_and_values_are_rejected() {
    let long = "a".repeat(64);
    assert!(matches!(
        validate_label_key(&long),
        Err(LabelConstraintError::TooLong { ref field, .. }) if field == "key"
    ));
    assert!(matches!(
        validate_label_value(&long),
        Err(LabelConstraintError::TooLong { ref field, .. }) if field == "value"
    ));
}

#[test]
fn length_is_counted_in_characters_not_bytes() {
    // 41 characters but 81 bytes: within the character limit, so the
    // charset is the failing constraint, not the length.
    let accented = format!("a{}", "é".repeat(40));
    assert!(matches!(
        validate_label_key(&accented),
        Err(LabelConstraintError::DisallowedCharacters { ref field, .. }) if field == "key"
    ));
    assert!(matches!(
        validate_label_value(&accented),
        Err(LabelConstraintError::DisallowedCharacters { ref field, .. }) if field == "value"
    ));
}

#[test]
fn keys_must_start_with_a_lowercase_letter() {
    assert!(matches!(
        validate_label_key("9lives"),
        Err(LabelConstraintError::BadKeyStart { .. })
    ));
    assert!(matches!(
        validate_label_key("-env"),
        Err(LabelConstraintError::BadKeyStart { .. })
    ));
}

#[test]
fn uppercase_and_symbols_are_disallowed() {
    assert!(matches!(
        validate_label_key("aBc"),
        Err(LabelConstraintError::DisallowedCharacters { ref field, .. }) if field == "key"
    ));
    assert!(matches!(
        validate_label_value("Prod!"),
        Err(LabelConstraintError::DisallowedCharacters { ref field, .. }) if field == "value"
    ));
}

#[test]
fn map_validation_collects_every_failure() {
    let mut labels = LabelMap::new();
    labels.insert("ok".to_string(), "fine".to_string());
    labels.insert(String::new(), "value".to_string());
    labels.insert("bad".to_string(), "UPPER".to_string());
    let errors = validate_label_map(&labels);
    assert_eq!(errors.len(), 2);
    assert!(errors.contains(&LabelConstraintError::EmptyKey));
    assert!(errors.iter().any(|error| matches!(
        error,
        LabelConstraintError::DisallowedCharacters { field, .. } if field == "value"
    )));
}

#[test]
fn map_validation_enforces_the_label_count_limit() {
    let mut labels = LabelMap::new();
    for index in 0 .. MAX_LABELS_PER_RESOURCE + 1 {
        labels.insert(format!("key-{index}"), "v".to_string());
    }
    let errors = validate_label_map(&labels);
    assert!(errors.contains(&LabelConstraintError::TooManyLabels {
        count: MAX_LABELS_PER_RESOURCE + 1,
    }));
}

#[test]
fn a_clean_map_yields_no_errors() {
    let mut labels = LabelMap::new();
    labels.insert("env".to_string(), "prod".to_string());
    labels.insert("owner".to_string(), String::new());
    assert!(validate_label_map(&labels).is_empty());
}
