// crates/labelforge-core/tests/hashing.rs
// ============================================================================
// Module: Canonical Hashing Tests
// Description: Verifies canonical label state hashing behavior.
// ============================================================================
//! ## Overview
//! Ensures label state hashing is deterministic across key ordering, enforces
//! the canonical byte limit, and feeds audit history entries correctly.

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
    reason = "Test-only output and panic-based assertions are permitted."
)]

use labelforge_core::HashAlgorithm;
use labelforge_core::HistoryEntry;
use labelforge_core::LabelMap;
use labelforge_core::Timestamp;
use labelforge_core::core::hashing::HashError;
use labelforge_core::core::hashing::hash_canonical_json_with_limit;
use labelforge_core::core::hashing::label_state_hash;

#[test]
fn label_state_hash_is_insertion_order_independent() {
    let mut first = LabelMap::new();
    first.insert("env".to_owned(), "prod".to_owned());
    first.insert("owner".to_owned(), "core".to_owned());

    let mut second = LabelMap::new();
    second.insert("owner".to_owned(), "core".to_owned());
    second.insert("env".to_owned(), "prod".to_owned());

    let hash_a = label_state_hash(&first).expect("hash first");
    let hash_b = label_state_hash(&second).expect("hash second");
    assert_eq!(hash_a, hash_b);
}

#[test]
fn different_states_produce_different_digests() {
    let mut first = LabelMap::new();
    first.insert("env".to_owned(), "prod".to_owned());
    let mut second = first.clone();
    second.insert("note".to_owned(), String::new());

    let hash_a = label_state_hash(&first).expect("hash first");
    let hash_b = label_state_hash(&second).expect("hash second");
    assert_ne!(hash_a, hash_b);
}

#[test]
fn oversized_canonical_input_is_rejected() {
    let mut labels = LabelMap::new();
    labels.insert("key".to_owned(), "v".repeat(256));
    let result = hash_canonical_json_with_limit(HashAlgorithm::Sha256, &labels, 64);
    assert!(matches!(result, Err(HashError::TooLarge { .. })));
}

#[test]
fn history_entries_carry_the_state_digest() {
    let mut labels = LabelMap::new();
    labels.insert("env".to_owned(), "prod".to_owned());
    let entry = HistoryEntry::record(
        1,
        Timestamp::UnixMillis(1_700_000_000_000),
        labels.clone(),
        Some("bulk relabel".to_owned()),
    )
    .expect("record entry");
    assert_eq!(entry.state_hash, label_state_hash(&labels).expect("hash"));
    assert_eq!(entry.seq, 1);
    assert_eq!(entry.recorded_at.as_unix_millis(), Some(1_700_000_000_000));
}

#[test]
fn unix_timestamps_render_as_rfc3339() {
    let stamp = Timestamp::UnixMillis(0);
    assert_eq!(stamp.to_rfc3339().as_deref(), Some("1970-01-01T00:00:00Z"));
    assert_eq!(Timestamp::Logical(7).to_rfc3339(), None);
}
