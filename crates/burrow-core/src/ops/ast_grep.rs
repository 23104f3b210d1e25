//! Structural (syntax-aware) search

use super::glob::{expand, require_pattern, SEARCH_MATCH_OPTIONS};
use crate::config::consts;
use crate::error::{require_positive, Result};
use crate::syntax::SyntaxEngine;
use crate::text::decode_lossy;
use crate::workspace::Workspace;
use std::fmt;

#[derive(Debug, Clone)]
pub struct AstGrepOptions {
    pub pattern: String,
    pub file_pattern: String,
    pub language: String,
    pub max_results: usize,
}

impl AstGrepOptions {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            file_pattern: consts::ast_grep::FILE_PATTERN.to_string(),
            language: consts::ast_grep::LANGUAGE.to_string(),
            max_results: consts::ast_grep::MAX_RESULTS,
        }
    }
}

/// One structural hit, positions 1-based
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMatch {
    pub relative_path: String,
    pub line: usize,
    pub column: usize,
    pub snippet: String,
}

/// Outcome of a structural search; `Display` renders the text report
#[derive(Debug, Clone)]
pub struct AstGrepReport {
    pub pattern: String,
    pub files_searched: usize,
    pub max_results: usize,
    pub matches: Vec<SearchMatch>,
}

impl AstGrepReport {
    /// The match cap was reached
    pub fn is_capped(&self) -> bool {
        self.matches.len() >= self.max_results
    }
}

impl fmt::Display for AstGrepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.matches.is_empty() {
            return write!(
                f,
                "No matches found for pattern '{}' in {} files searched.",
                self.pattern, self.files_searched
            );
        }

        write!(
            f,
            "Found {} matches for pattern '{}' in {} files:\n\n{}\n\n",
            self.matches.len(),
            self.pattern,
            self.files_searched,
            "=".repeat(consts::ast_grep::RULE_WIDTH)
        )?;
        let entries: Vec<String> = self
            .matches
            .iter()
            .map(|m| {
                format!(
                    "File: {}:{}:{}\n{}\n",
                    m.relative_path, m.line, m.column, m.snippet
                )
            })
            .collect();
        f.write_str(&entries.join("\n"))?;
        if self.is_capped() {
            write!(f, "\n\n... (showing first {} results)", self.max_results)?;
        }
        Ok(())
    }
}

/// Runs `options.pattern` against every file selected by `file_pattern`
///
/// Blank files and files the engine cannot handle are skipped (logged at
/// debug level) but still count as searched.
pub fn ast_grep(
    workspace: &Workspace,
    engine: &dyn SyntaxEngine,
    options: &AstGrepOptions,
) -> Result<AstGrepReport> {
    require_pattern("pattern", &options.pattern)?;
    require_pattern("file_pattern", &options.file_pattern)?;
    require_pattern("language", &options.language)?;
    let max_results = require_positive("max_results", options.max_results)?;

    let validator = workspace.validator();
    let mut report = AstGrepReport {
        pattern: options.pattern.clone(),
        files_searched: 0,
        max_results,
        matches: Vec::new(),
    };

    let candidates = expand(
        workspace,
        &validator,
        &options.file_pattern,
        SEARCH_MATCH_OPTIONS,
    )?;
    for candidate in candidates {
        if report.matches.len() >= max_results {
            break;
        }
        if !candidate.path.is_file() {
            continue;
        }
        report.files_searched += 1;

        let source = match std::fs::read(&candidate.path) {
            Ok(bytes) => decode_lossy(&bytes),
            Err(e) => {
                tracing::debug!(path = %candidate.relative, "skipping unreadable file: {}", e);
                continue;
            }
        };
        if source.trim().is_empty() {
            continue;
        }

        let found = engine
            .parse(&source, &options.language)
            .and_then(|tree| tree.find_all(&options.pattern));
        let found = match found {
            Ok(found) => found,
            Err(e) => {
                tracing::debug!(path = %candidate.relative, "could not search file: {}", e);
                continue;
            }
        };

        let room = max_results - report.matches.len();
        report
            .matches
            .extend(found.into_iter().take(room).map(|m| SearchMatch {
                relative_path: candidate.relative.clone(),
                line: m.start_line + 1,
                column: m.start_column + 1,
                snippet: m.text,
            }));
    }

    Ok(report)
}
