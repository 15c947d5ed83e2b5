//! Configuration management for `safecp-core`.
//!
//! This module defines the on-disk pattern file model and handles loading,
//! validation, and first-run provisioning of the per-user pattern file.
//! The file is a JSON mapping from pattern name to a rule object; the order
//! of entries in the file is the order patterns are applied, so the mapping
//! is kept insertion-ordered after parsing.
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use indexmap::IndexMap;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::SafecpError;

/// File name of the per-user pattern file, resolved under the home directory.
pub const USER_PATTERNS_FILENAME: &str = ".safecp.patterns.json";

/// The bundled default pattern set, provisioned on first run.
pub const DEFAULT_PATTERNS_JSON: &str = include_str!("../config/default_patterns.json");

/// Represents a single detection rule as it appears in the pattern file.
///
/// The rule's unique name is the key of the enclosing mapping, not a field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PatternRule {
    /// The regex pattern string applied to raw clipboard text.
    pub pattern: String,
    /// The placeholder template; may contain the literal token `{counter}`.
    pub replacement_template: String,
}

/// The parsed pattern file: an ordered mapping from rule name to rule.
///
/// Insertion order equals file order and is semantically significant: it is
/// the order rules are applied during discovery.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct PatternConfig {
    pub rules: IndexMap<String, PatternRule>,
}

impl PatternConfig {
    /// Loads a pattern mapping from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, SafecpError> {
        let path = path.as_ref();
        info!("Loading patterns from: {}", path.display());
        let text = fs::read_to_string(path).map_err(|source| SafecpError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: PatternConfig =
            serde_json::from_str(&text).map_err(|source| SafecpError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;

        info!("Loaded {} patterns from {}.", config.rules.len(), path.display());
        Ok(config)
    }

    /// Loads the bundled default pattern set from the embedded configuration.
    pub fn load_default_rules() -> Result<Self> {
        debug!("Loading default patterns from embedded string...");
        let config: PatternConfig = serde_json::from_str(DEFAULT_PATTERNS_JSON)
            .context("Failed to parse default patterns")?;

        debug!("Loaded {} default patterns.", config.rules.len());
        Ok(config)
    }
}

/// Returns the per-user pattern file path (`~/.safecp.patterns.json`).
pub fn user_patterns_path() -> Result<PathBuf, SafecpError> {
    let home = dirs::home_dir().ok_or(SafecpError::HomeDirUnavailable)?;
    Ok(home.join(USER_PATTERNS_FILENAME))
}

/// Seeds `path` with the bundled default patterns if it does not exist.
///
/// Idempotent: an existing file is never overwritten, whatever it contains.
pub fn provision_patterns_file<P: AsRef<Path>>(path: P) -> Result<(), SafecpError> {
    let path = path.as_ref();
    if path.exists() {
        debug!("Pattern file already present at {}.", path.display());
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, DEFAULT_PATTERNS_JSON)?;
    info!("Provisioned default patterns at {}.", path.display());
    Ok(())
}

/// Resolves the per-user pattern file, provisioning it on first run.
pub fn ensure_user_patterns_file() -> Result<PathBuf, SafecpError> {
    let path = user_patterns_path()?;
    provision_patterns_file(&path)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rules_parse_and_keep_file_order() {
        let config = PatternConfig::load_default_rules().unwrap();
        assert!(!config.rules.is_empty());
        assert!(config.rules.contains_key("email"));
        // The AWS rule is first in the bundled file and must stay first.
        assert_eq!(config.rules.keys().next().unwrap(), "aws_access_key");
    }

    #[test]
    fn entry_missing_template_is_a_parse_error() {
        let json = r#"{"aws_key": {"pattern": "AKIA[0-9A-Z]{16}"}}"#;
        let err = serde_json::from_str::<PatternConfig>(json);
        assert!(err.is_err());
    }
}
