use super::consts;
use crate::error::{BurrowError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// burrow.toml schema - per-workspace defaults
///
/// Only changes the defaults of omitted arguments; the sandbox itself is
/// not configurable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub ast_grep: AstGrepConfig,
    #[serde(default)]
    pub read: ReadConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LimitsConfig {
    pub glob_max_results: usize,
    pub find_max_results: usize,
    pub ast_grep_max_results: usize,
    pub tree_max_depth: usize,
    pub tree_max_entries: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            glob_max_results: consts::glob::MAX_RESULTS,
            find_max_results: consts::find::MAX_RESULTS,
            ast_grep_max_results: consts::ast_grep::MAX_RESULTS,
            tree_max_depth: consts::tree::MAX_DEPTH,
            tree_max_entries: consts::tree::MAX_ENTRIES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AstGrepConfig {
    pub language: String,
    pub file_pattern: String,
}

impl Default for AstGrepConfig {
    fn default() -> Self {
        Self {
            language: consts::ast_grep::LANGUAGE.to_string(),
            file_pattern: consts::ast_grep::FILE_PATTERN.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReadConfig {
    pub encoding: String,
}

impl Default for ReadConfig {
    fn default() -> Self {
        Self {
            encoding: consts::read::ENCODING.to_string(),
        }
    }
}

impl Config {
    /// Loads `burrow.toml` from `root`; a missing file yields the defaults
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(consts::CONFIG_FILE);
        if !path.is_file() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(&path)?;
        let config = Self::from_toml(&text)?;
        tracing::debug!(path = %path.display(), "loaded workspace config");
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| BurrowError::ConfigInvalid {
            field: consts::CONFIG_FILE.to_string(),
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let limits = [
            ("limits.glob_max_results", self.limits.glob_max_results),
            ("limits.find_max_results", self.limits.find_max_results),
            ("limits.ast_grep_max_results", self.limits.ast_grep_max_results),
            ("limits.tree_max_depth", self.limits.tree_max_depth),
            ("limits.tree_max_entries", self.limits.tree_max_entries),
        ];
        for (field, value) in limits {
            if value < 1 {
                return Err(invalid_value(field, "must be >= 1"));
            }
        }

        if self.ast_grep.language.trim().is_empty() {
            return Err(invalid_value("ast_grep.language", "must not be empty"));
        }
        if self.ast_grep.file_pattern.trim().is_empty() {
            return Err(invalid_value("ast_grep.file_pattern", "must not be empty"));
        }
        if encoding_rs::Encoding::for_label(self.read.encoding.trim().as_bytes()).is_none() {
            return Err(invalid_value(
                "read.encoding",
                format!("unknown encoding '{}'", self.read.encoding),
            ));
        }
        Ok(())
    }
}

fn invalid_value(field: &str, reason: impl Into<String>) -> BurrowError {
    BurrowError::ConfigInvalid {
        field: field.to_string(),
        reason: reason.into(),
    }
}
