//! Policy file support for aibom-scan.
//!
//! A policy file is a YAML document with a single recognized key,
//! `reject`, holding the list of forbidden model names. Names are
//! compared with exact (case-insensitive) identity during scanning.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use serde::Deserialize;

use crate::shared::error::ScanError;
use crate::shared::Result;

/// Top-level policy file schema.
#[derive(Debug, Deserialize, Default)]
pub struct PolicyFile {
    pub reject: Vec<String>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Loads a policy file and returns the normalized reject set.
///
/// Names are trimmed and lowercased once here so the matcher can use
/// plain set membership.
pub fn load_policy_from_path(path: &Path) -> Result<BTreeSet<String>> {
    let content = std::fs::read_to_string(path).map_err(|e| ScanError::PolicyFile {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;

    let policy: PolicyFile =
        serde_yaml_ng::from_str(&content).map_err(|e| ScanError::PolicyFile {
            path: path.to_path_buf(),
            details: format!("invalid YAML: {}", e),
        })?;

    validate_policy(path, &policy)?;
    warn_unknown_fields(&policy);

    Ok(policy
        .reject
        .iter()
        .map(|name| name.trim().to_lowercase())
        .collect())
}

/// Validates the loaded policy.
fn validate_policy(path: &Path, policy: &PolicyFile) -> Result<()> {
    for (i, name) in policy.reject.iter().enumerate() {
        if name.trim().is_empty() {
            return Err(ScanError::PolicyFile {
                path: path.to_path_buf(),
                details: format!("reject[{}] must not be empty", i),
            }
            .into());
        }
    }
    Ok(())
}

/// Warns about unknown fields in the policy file.
fn warn_unknown_fields(policy: &PolicyFile) {
    for key in policy.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown policy field '{}' will be ignored.",
            key
        );
    }
}
