// crates/labelforge-core/tests/preview.rs
// ============================================================================
// Module: Bulk Preview Orchestrator Tests
// Description: Validate preview aggregation and the two-step commit session.
// Purpose: Ensure no-op exclusion and review gating behave deterministically.
// Dependencies: labelforge-core
// ============================================================================

//! Behavior tests for preview aggregation and the studio session machine.

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

use labelforge_core::ExtractionRule;
use labelforge_core::LabelPair;
use labelforge_core::Resource;
use labelforge_core::ResourceId;
use labelforge_core::ResourceKind;
use labelforge_core::ResourceStatus;
use labelforge_core::RuleKind;
use labelforge_core::StudioConfig;
use labelforge_core::StudioError;
use labelforge_core::StudioPhase;
use labelforge_core::StudioSession;
use labelforge_core::apply_preview;
use labelforge_core::build_preview;

/// Builds a resource with one label.
fn resource(id: &str, key: &str, value: &str) -> Resource {
    let mut res = Resource::new(
        id,
        id,
        ResourceKind::Bucket,
        "us-east1",
        ResourceStatus::Running,
    );
    res.labels.insert(key.to_owned(), value.to_owned());
    res
}

/// Static rule assigning `env=prod`.
fn env_prod_rule() -> ExtractionRule {
    ExtractionRule::Static {
        pairs: vec![LabelPair {
            key: "env".to_owned(),
            value: "prod".to_owned(),
        }],
    }
}

/// Studio config whose active rule assigns `env=prod`.
fn env_prod_config() -> StudioConfig {
    let mut config = StudioConfig::new(RuleKind::Static);
    config.static_pairs = vec![LabelPair {
        key: "env".to_owned(),
        value: "prod".to_owned(),
    }];
    config
}

#[test]
fn unaffected_resources_are_excluded_from_the_preview() {
    let fleet = vec![resource("a", "env", "dev"), resource("b", "env", "prod")];
    let preview = build_preview(&fleet, &env_prod_rule());
    assert_eq!(preview.len(), 1);
    assert!(preview.contains_key(&ResourceId::new("a")));
    assert!(!preview.contains_key(&ResourceId::new("b")));
}

#[test]
fn apply_strips_bookkeeping_and_keeps_final_maps() {
    let fleet = vec![resource("a", "env", "dev")];
    let preview = build_preview(&fleet, &env_prod_rule());
    let apply_set = apply_preview(&preview);
    assert_eq!(apply_set.len(), 1);
    let labels = &apply_set[&ResourceId::new("a")];
    assert_eq!(labels.get("env").map(String::as_str), Some("prod"));
}

#[test]
fn review_requires_both_valid_config_and_non_empty_preview() {
    // Valid config, but every resource already carries env=prod.
    let settled = vec![resource("a", "env", "prod")];
    let mut session = StudioSession::new(env_prod_config());
    assert_eq!(session.begin_review(&settled), Err(StudioError::EmptyPreview));

    // Invalid config is rejected before the preview is consulted.
    let fleet = vec![resource("a", "env", "dev")];
    let mut blank = StudioSession::new(StudioConfig::new(RuleKind::Static));
    assert_eq!(blank.begin_review(&fleet), Err(StudioError::InvalidConfig));
}

#[test]
fn back_returns_to_configure_without_losing_parameters() -> Result<(), StudioError> {
    let fleet = vec![resource("a", "env", "dev")];
    let mut session = StudioSession::new(env_prod_config());
    session.begin_review(&fleet)?;
    assert_eq!(session.phase(), StudioPhase::Review);

    session.back()?;
    assert_eq!(session.phase(), StudioPhase::Configure);
    assert_eq!(session.config().static_pairs.len(), 1);
    assert_eq!(session.config().static_pairs[0].value, "prod");
    Ok(())
}

#[test]
fn commit_yields_the_apply_set_and_consumes_the_session() -> Result<(), StudioError> {
    let fleet = vec![resource("a", "env", "dev"), resource("b", "team", "core")];
    let mut session = StudioSession::new(env_prod_config());
    let preview = session.begin_review(&fleet)?;
    assert_eq!(preview.len(), 2);

    let apply_set = session.commit()?;
    assert_eq!(apply_set.len(), 2);
    assert_eq!(apply_set[&ResourceId::new("b")].get("env").map(String::as_str), Some("prod"));
    Ok(())
}

#[test]
fn commit_from_configure_is_precluded() {
    let session = StudioSession::new(env_prod_config());
    assert_eq!(
        session.commit(),
        Err(StudioError::WrongPhase {
            phase: StudioPhase::Configure,
        })
    );
}

#[test]
fn config_edits_are_rejected_during_review() -> Result<(), StudioError> {
    let fleet = vec![resource("a", "env", "dev")];
    let mut session = StudioSession::new(env_prod_config());
    session.begin_review(&fleet)?;
    assert!(session.config_mut().is_err());
    assert!(session.switch_strategy(RuleKind::Cleanup).is_err());
    Ok(())
}

#[test]
fn preview_recomputation_is_last_write_wins() {
    // Stale inputs are simply discarded: recomputing over a new snapshot
    // depends only on that snapshot.
    let stale = vec![resource("a", "env", "dev")];
    let fresh = vec![resource("b", "env", "dev")];
    let session = StudioSession::new(env_prod_config());
    let first = session.preview(&stale);
    let second = session.preview(&fresh);
    assert!(first.contains_key(&ResourceId::new("a")));
    assert!(second.contains_key(&ResourceId::new("b")));
    assert!(!second.contains_key(&ResourceId::new("a")));
}
