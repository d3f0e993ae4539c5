// crates/labelforge-core/src/core/time.rs
// ============================================================================
// Module: Labelforge Time Model
// Description: Canonical timestamp representation for audit records.
// Purpose: Provide deterministic, replayable time values across Labelforge records.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! Labelforge embeds explicit time values in audit history records to keep
//! replay deterministic. The core engine never reads wall-clock time; hosts
//! must supply timestamps when constructing records.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

// ============================================================================
// SECTION: Time Values
// ============================================================================

/// Canonical timestamp used in Labelforge audit records.
///
/// # Invariants
/// - Values are explicitly provided by callers; the core never reads wall-clock time.
/// - No validation is performed; monotonicity is a caller responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Timestamp {
    /// Unix epoch milliseconds.
    UnixMillis(i64),
    /// Monotonic logical time value.
    Logical(u64),
}

impl Timestamp {
    /// Returns the timestamp as unix milliseconds when available.
    #[must_use]
    pub const fn as_unix_millis(&self) -> Option<i64> {
        match self {
            Self::UnixMillis(value) => Some(*value),
            Self::Logical(_) => None,
        }
    }

    /// Returns the timestamp as logical time when available.
    #[must_use]
    pub const fn as_logical(&self) -> Option<u64> {
        match self {
            Self::UnixMillis(_) => None,
            Self::Logical(value) => Some(*value),
        }
    }

    /// Renders a unix-millisecond timestamp as an RFC 3339 string.
    ///
    /// Returns `None` for logical timestamps or out-of-range values.
    #[must_use]
    pub fn to_rfc3339(&self) -> Option<String> {
        let millis = self.as_unix_millis()?;
        let nanos = i128::from(millis).checked_mul(1_000_000)?;
        let moment = OffsetDateTime::from_unix_timestamp_nanos(nanos).ok()?;
        moment.format(&Rfc3339).ok()
    }
}
