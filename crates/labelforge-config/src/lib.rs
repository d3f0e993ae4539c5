// crates/labelforge-config/src/lib.rs
// ============================================================================
// Module: Labelforge Config
// Description: Governance configuration loading and validation.
// Purpose: Load taxonomy and policy definitions with fail-closed guards.
// Dependencies: labelforge-core, serde, thiserror, toml
// ============================================================================

//! ## Overview
//! This crate loads the governance configuration: the organizational label
//! taxonomy and user-authored custom policies, expressed in TOML. Loading is
//! strict and fail-closed: path and size limits are enforced before any
//! parsing, the schema rejects unknown fields, and semantic validation
//! rejects duplicate or colliding policy identifiers. A validated
//! configuration converts into the core [`PolicySet`], combining
//! taxonomy-derived built-ins with the configured custom policies.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;

use labelforge_core::GovernancePolicy;
use labelforge_core::PolicyCategory;
use labelforge_core::PolicyId;
use labelforge_core::PolicySet;
use labelforge_core::RuleSpec;
use labelforge_core::Severity;
use labelforge_core::Taxonomy;
use labelforge_core::derive_policies;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum accepted config path length in bytes.
pub const MAX_CONFIG_PATH_BYTES: usize = 4_096;

/// Maximum accepted path component length in bytes.
pub const MAX_PATH_COMPONENT_BYTES: usize = 255;

/// Maximum accepted config file size in bytes.
pub const MAX_CONFIG_FILE_BYTES: u64 = 1_048_576;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading and validation errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling; messages are stable for
///   operator-facing diagnostics.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Path exceeds the accepted length.
    #[error("config path exceeds max length of {MAX_CONFIG_PATH_BYTES} bytes")]
    PathTooLong,
    /// A path component exceeds the accepted length.
    #[error("config path component too long (max {MAX_PATH_COMPONENT_BYTES} bytes)")]
    PathComponentTooLong,
    /// File exceeds the accepted size.
    #[error("config file exceeds max size of {MAX_CONFIG_FILE_BYTES} bytes ({actual} bytes)")]
    FileTooLarge {
        /// Actual file size in bytes.
        actual: u64,
    },
    /// File could not be read.
    #[error("config read failed: {0}")]
    Read(#[from] std::io::Error),
    /// File is not valid UTF-8.
    #[error("config is not valid utf-8")]
    Encoding,
    /// TOML parsing or schema validation failed.
    #[error("config parse failed: {0}")]
    Parse(String),
    /// A policy entry has a blank identifier.
    #[error("policy entry {index} has a blank id")]
    BlankPolicyId {
        /// Zero-based entry index.
        index: usize,
    },
    /// Two policy entries share an identifier.
    #[error("duplicate policy id '{id}'")]
    DuplicatePolicyId {
        /// Offending identifier.
        id: String,
    },
    /// A policy entry collides with a taxonomy-derived identifier.
    #[error("policy id '{id}' collides with a taxonomy-derived policy")]
    DerivedIdCollision {
        /// Offending identifier.
        id: String,
    },
    /// Two taxonomy entries share a key.
    #[error("duplicate taxonomy key '{key}'")]
    DuplicateTaxonomyKey {
        /// Offending key.
        key: String,
    },
}

// ============================================================================
// SECTION: Config Model
// ============================================================================

/// One user-authored policy entry.
///
/// # Invariants
/// - `id` is non-blank and unique within the config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyEntry {
    /// Policy identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Open category string.
    pub category: String,
    /// Severity level.
    pub severity: Severity,
    /// Whether the policy starts enabled.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Rule evaluated against each resource.
    pub rule: RuleSpec,
}

/// Default for the `enabled` field.
const fn default_enabled() -> bool {
    true
}

/// Governance configuration: taxonomy plus custom policies.
///
/// # Invariants
/// - Validated on load; an instance in hand passed all guards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GovernanceConfig {
    /// Organizational label taxonomy.
    #[serde(default)]
    pub taxonomy: Taxonomy,
    /// User-authored custom policies.
    #[serde(default)]
    pub policies: Vec<PolicyEntry>,
}

impl GovernanceConfig {
    /// Loads and validates a governance config from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when any path, size, encoding, schema, or
    /// semantic guard fails.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        validate_path(path)?;
        let metadata = fs::metadata(path)?;
        if metadata.len() > MAX_CONFIG_FILE_BYTES {
            return Err(ConfigError::FileTooLarge {
                actual: metadata.len(),
            });
        }
        let bytes = fs::read(path)?;
        let text = String::from_utf8(bytes).map_err(|_| ConfigError::Encoding)?;
        Self::from_toml_str(&text)
    }

    /// Parses and validates a governance config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or semantic validation fails.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(text).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Runs semantic validation over the parsed config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for blank, duplicate, or colliding
    /// identifiers.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut taxonomy_keys: Vec<&str> = Vec::new();
        for entry in &self.taxonomy.keys {
            if taxonomy_keys.contains(&entry.key.as_str()) {
                return Err(ConfigError::DuplicateTaxonomyKey {
                    key: entry.key.clone(),
                });
            }
            taxonomy_keys.push(entry.key.as_str());
        }

        let derived: Vec<PolicyId> =
            derive_policies(&self.taxonomy).into_iter().map(|policy| policy.id).collect();
        let mut seen: Vec<&str> = Vec::new();
        for (index, entry) in self.policies.iter().enumerate() {
            if entry.id.trim().is_empty() {
                return Err(ConfigError::BlankPolicyId {
                    index,
                });
            }
            if seen.contains(&entry.id.as_str()) {
                return Err(ConfigError::DuplicatePolicyId {
                    id: entry.id.clone(),
                });
            }
            if derived.iter().any(|id| id.as_str() == entry.id) {
                return Err(ConfigError::DerivedIdCollision {
                    id: entry.id.clone(),
                });
            }
            seen.push(entry.id.as_str());
        }
        Ok(())
    }

    /// Converts the config into the core policy set.
    ///
    /// Taxonomy-derived built-ins come first, followed by the configured
    /// custom policies in declaration order.
    #[must_use]
    pub fn into_policy_set(self) -> PolicySet {
        let mut policies = derive_policies(&self.taxonomy);
        for entry in self.policies {
            policies.push(GovernancePolicy {
                id: PolicyId::new(entry.id),
                name: entry.name,
                description: entry.description,
                category: PolicyCategory::new(entry.category),
                severity: entry.severity,
                enabled: entry.enabled,
                custom: true,
                rule: entry.rule,
            });
        }
        PolicySet::from_policies(policies)
    }
}

/// Validates path length guards before touching the filesystem.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    if path.as_os_str().len() > MAX_CONFIG_PATH_BYTES {
        return Err(ConfigError::PathTooLong);
    }
    for component in path.components() {
        if component.as_os_str().len() > MAX_PATH_COMPONENT_BYTES {
            return Err(ConfigError::PathComponentTooLong);
        }
    }
    Ok(())
}
