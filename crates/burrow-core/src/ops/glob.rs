//! Glob expansion anchored at the workspace root

use super::Stat;
use crate::config::consts;
use crate::error::{require_positive, BurrowError, Result};
use crate::path::{normalize_lexically, PathValidator, ValidatedPath};
use crate::workspace::Workspace;
use glob::{MatchOptions, Pattern};
use std::path::Path;
use std::str::FromStr;

/// `glob` tool: wildcards never match a leading dot
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// File selection for content searches: dot-files and dot-directories
/// are candidates like any other path
pub(crate) const SEARCH_MATCH_OPTIONS: MatchOptions = MatchOptions {
    require_literal_leading_dot: false,
    ..MATCH_OPTIONS
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GlobSort {
    #[default]
    Name,
    Mtime,
    Size,
}

impl FromStr for GlobSort {
    type Err = BurrowError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "name" => Ok(Self::Name),
            "mtime" => Ok(Self::Mtime),
            "size" => Ok(Self::Size),
            other => Err(BurrowError::invalid(format!(
                "sort_by must be one of: name, mtime, size (got '{other}')"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GlobOptions {
    pub pattern: String,
    pub sort_by: GlobSort,
    pub max_results: usize,
    pub reverse: bool,
}

impl GlobOptions {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            sort_by: GlobSort::default(),
            max_results: consts::glob::MAX_RESULTS,
            reverse: false,
        }
    }
}

/// A validated glob hit
#[derive(Debug, Clone)]
pub(crate) struct Candidate {
    /// Root-relative for relative patterns, absolute otherwise
    pub display: String,
    /// Always root-relative, `/`-joined
    pub relative: String,
    pub path: ValidatedPath,
}

/// Expands `options.pattern` and returns at most `max_results` paths
///
/// ```rust,no_run
/// use burrow_core::ops::glob::{glob, GlobOptions};
/// use burrow_core::Workspace;
///
/// let workspace = Workspace::open(".")?;
/// for path in glob(&workspace, &GlobOptions::new("src/**/*.rs"))? {
///     println!("{path}");
/// }
/// # Ok::<(), burrow_core::BurrowError>(())
/// ```
pub fn glob(workspace: &Workspace, options: &GlobOptions) -> Result<Vec<String>> {
    require_pattern("pattern", &options.pattern)?;
    let max_results = require_positive("max_results", options.max_results)?;

    let validator = workspace.validator();
    let candidates = expand(workspace, &validator, &options.pattern, MATCH_OPTIONS)?;
    let mut hits: Vec<(Candidate, Stat)> = candidates
        .into_iter()
        .map(|candidate| {
            // Zeroed when the path vanished after validation
            let stat = Stat::of(&candidate.path)
                .map(|(stat, _)| stat)
                .unwrap_or_default();
            (candidate, stat)
        })
        .collect();

    hits.sort_by_cached_key(|(c, _)| c.display.to_lowercase());
    match options.sort_by {
        GlobSort::Name => {}
        GlobSort::Mtime => hits.sort_by_key(|(_, stat)| stat.mtime()),
        GlobSort::Size => hits.sort_by_key(|(_, stat)| stat.size),
    }
    if options.reverse {
        hits.reverse();
    }
    hits.truncate(max_results);

    Ok(hits.into_iter().map(|(c, _)| c.display).collect())
}

pub(crate) fn require_pattern(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BurrowError::invalid(format!("{name} must not be empty")));
    }
    Ok(())
}

/// Every existing path matching `pattern` that passes the validator
///
/// Relative patterns are anchored at the workspace root, never at the
/// process working directory. Unreadable directories met while expanding
/// are skipped.
pub(crate) fn expand(
    workspace: &Workspace,
    validator: &PathValidator,
    pattern: &str,
    match_options: MatchOptions,
) -> Result<Vec<Candidate>> {
    let absolute = Path::new(pattern).is_absolute();
    let full = if absolute {
        pattern.to_string()
    } else {
        let root = Pattern::escape(&workspace.root().to_string_lossy());
        let relative = pattern.trim_start_matches("./");
        format!("{}/{}", root.trim_end_matches('/'), relative)
    };

    let paths = glob::glob_with(&full, match_options)
        .map_err(|e| BurrowError::invalid(format!("invalid glob pattern '{pattern}': {e}")))?;

    let mut candidates = Vec::new();
    for entry in paths {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                tracing::debug!("skipping unreadable glob entry: {}", e);
                continue;
            }
        };
        let Ok(validated) = validator.validate(&path) else {
            continue;
        };
        let relative = match workspace
            .relative(&normalize_lexically(&path))
            .or_else(|| workspace.relative(&validated))
        {
            Some(rel) if rel != "." => rel,
            _ => continue,
        };
        let display = if absolute {
            path.display().to_string()
        } else {
            relative.clone()
        };
        candidates.push(Candidate {
            display,
            relative,
            path: validated,
        });
    }
    Ok(candidates)
}
