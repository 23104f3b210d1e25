//! fs ツールの引数型と共通ヘルパー

use crate::errors;
use burrow_core::BurrowError;
use rmcp::{ErrorData as McpError, model::*, schemars, serde};
use std::str::FromStr;

// ==================== 型定義 ====================

#[derive(Debug, Default, serde::Deserialize, schemars::JsonSchema)]
pub struct PwdArgs {}

#[derive(Debug, Default, serde::Deserialize, schemars::JsonSchema)]
pub struct LsArgs {
    /// Directory to list, relative to the workspace root (default ".")
    #[serde(default)]
    pub path: Option<String>,
    /// One of "name", "mtime", "size", "type" (default "name")
    #[serde(default)]
    pub sort_by: Option<String>,
    /// Include entries whose name starts with "."
    #[serde(default)]
    pub show_hidden: bool,
    /// Return a formatted report with kind, size and modification time
    #[serde(default)]
    pub show_details: bool,
    #[serde(default)]
    pub reverse: bool,
}

#[derive(Debug, Default, serde::Deserialize, schemars::JsonSchema)]
pub struct GlobArgs {
    /// Glob pattern, relative patterns are anchored at the workspace root
    pub pattern: String,
    /// One of "name", "mtime", "size" (default "name")
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub max_results: Option<usize>,
    #[serde(default)]
    pub reverse: bool,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct FindArgs {
    /// Text to look for
    pub search_text: String,
    /// Files to search (default "**/*")
    #[serde(default)]
    pub file_pattern: Option<String>,
    #[serde(default = "default_true")]
    pub case_sensitive: bool,
    /// Match only at word boundaries
    #[serde(default)]
    pub whole_word: bool,
    #[serde(default)]
    pub max_results: Option<usize>,
    /// One of "name", "mtime" (default "name")
    #[serde(default)]
    pub sort_by: Option<String>,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct AstGrepArgs {
    /// Structural pattern, e.g. "print($A)"
    pub pattern: String,
    #[serde(default)]
    pub file_pattern: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub max_results: Option<usize>,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct TreeArgs {
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub max_depth: Option<usize>,
    #[serde(default = "default_true")]
    pub include_files: bool,
    #[serde(default)]
    pub max_entries: Option<usize>,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ReadFilesArgs {
    /// Paths relative to the workspace root
    pub files: Vec<String>,
    #[serde(default)]
    pub include_line_numbers: bool,
    #[serde(default)]
    pub max_lines_per_file: Option<usize>,
    /// Encoding label such as "utf-8" or "latin1"
    #[serde(default)]
    pub encoding: Option<String>,
}

pub(crate) fn default_true() -> bool {
    true
}

// ==================== 共通ヘルパー ====================

/// 省略時はデフォルトのソートキー
pub(crate) fn parse_sort<S>(value: Option<&str>) -> Result<S, McpError>
where
    S: FromStr<Err = BurrowError> + Default,
{
    let parsed = value
        .map(str::parse::<S>)
        .transpose()
        .map_err(errors::from_core_error)?;
    Ok(parsed.unwrap_or_default())
}

pub(crate) fn text_result(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

pub(crate) fn json_result<T: serde::Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string(value).map_err(errors::from_display)?;
    Ok(text_result(text))
}
