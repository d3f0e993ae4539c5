// crates/labelforge-core/src/core/hashing.rs
// ============================================================================
// Module: Labelforge Canonical Hashing
// Description: Canonical JSON hashing for label state snapshots.
// Purpose: Give audit history entries a stable, order-independent digest.
// Dependencies: serde, serde_jcs, sha2, thiserror
// ============================================================================

//! ## Overview
//! Audit history entries carry a digest of the label state they record so an
//! external audit log can detect tampering and deduplicate identical states.
//! Hashing uses RFC 8785 canonical JSON, so key order never affects the
//! digest, and enforces a byte limit on the canonical form.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use sha2::Digest;
use sha2::Sha256;
use thiserror::Error;

use crate::core::resource::LabelMap;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default hash algorithm for label state digests.
pub const DEFAULT_HASH_ALGORITHM: HashAlgorithm = HashAlgorithm::Sha256;

/// Default byte limit for canonical JSON inputs.
pub const DEFAULT_MAX_CANONICAL_BYTES: usize = 1_048_576;

// ============================================================================
// SECTION: Hash Types
// ============================================================================

/// Supported hash algorithms.
///
/// # Invariants
/// - Variants are stable for serialization and digest verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashAlgorithm {
    /// SHA-256.
    Sha256,
}

/// A computed digest with its algorithm.
///
/// # Invariants
/// - `hex` is the lowercase hexadecimal rendering of the digest bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashDigest {
    /// Algorithm that produced the digest.
    pub algorithm: HashAlgorithm,
    /// Lowercase hexadecimal digest.
    pub hex: String,
}

impl fmt::Display for HashDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sha256:{}", self.hex)
    }
}

/// Hashing failures.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum HashError {
    /// Value could not be canonicalized (non-finite floats, etc.).
    #[error("canonical json encoding failed: {0}")]
    Canonicalize(String),
    /// Canonical form exceeded the byte limit.
    #[error("canonical json exceeds {limit} byte limit ({actual} bytes)")]
    TooLarge {
        /// Configured byte limit.
        limit: usize,
        /// Actual canonical size.
        actual: usize,
    },
}

// ============================================================================
// SECTION: Hashing Functions
// ============================================================================

/// Hashes raw bytes with the given algorithm.
#[must_use]
pub fn hash_bytes(algorithm: HashAlgorithm, bytes: &[u8]) -> HashDigest {
    match algorithm {
        HashAlgorithm::Sha256 => {
            let mut hasher = Sha256::new();
            hasher.update(bytes);
            let digest = hasher.finalize();
            let mut hex = String::with_capacity(digest.len() * 2);
            for byte in digest {
                hex.push_str(&format!("{byte:02x}"));
            }
            HashDigest {
                algorithm,
                hex,
            }
        }
    }
}

/// Encodes a value as RFC 8785 canonical JSON bytes.
///
/// # Errors
///
/// Returns [`HashError::Canonicalize`] when the value cannot be represented
/// in canonical JSON.
pub fn canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, HashError> {
    serde_jcs::to_string(value)
        .map(String::into_bytes)
        .map_err(|err| HashError::Canonicalize(err.to_string()))
}

/// Hashes a value's canonical JSON form with the default byte limit.
///
/// # Errors
///
/// Returns [`HashError`] when canonicalization fails or the canonical form
/// exceeds [`DEFAULT_MAX_CANONICAL_BYTES`].
pub fn hash_canonical_json<T: Serialize>(
    algorithm: HashAlgorithm,
    value: &T,
) -> Result<HashDigest, HashError> {
    hash_canonical_json_with_limit(algorithm, value, DEFAULT_MAX_CANONICAL_BYTES)
}

/// Hashes a value's canonical JSON form with an explicit byte limit.
///
/// # Errors
///
/// Returns [`HashError`] when canonicalization fails or the canonical form
/// exceeds `max_bytes`.
pub fn hash_canonical_json_with_limit<T: Serialize>(
    algorithm: HashAlgorithm,
    value: &T,
    max_bytes: usize,
) -> Result<HashDigest, HashError> {
    let bytes = canonical_json_bytes(value)?;
    if bytes.len() > max_bytes {
        return Err(HashError::TooLarge {
            limit: max_bytes,
            actual: bytes.len(),
        });
    }
    Ok(hash_bytes(algorithm, &bytes))
}

/// Hashes a label map with the default algorithm and limit.
///
/// # Errors
///
/// Returns [`HashError`] when the map cannot be canonicalized or exceeds the
/// default byte limit.
pub fn label_state_hash(labels: &LabelMap) -> Result<HashDigest, HashError> {
    hash_canonical_json(DEFAULT_HASH_ALGORITHM, labels)
}
