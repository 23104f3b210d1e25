//! Plain-text search over files selected by a glob

use super::glob::{expand, require_pattern, SEARCH_MATCH_OPTIONS};
use super::Stat;
use crate::config::consts;
use crate::error::{require_positive, BurrowError, Result};
use crate::text::decode_lossy;
use crate::workspace::Workspace;
use regex::{Regex, RegexBuilder};
use std::cmp::Reverse;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FindSort {
    #[default]
    Name,
    /// Newest first
    Mtime,
}

impl FromStr for FindSort {
    type Err = BurrowError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "name" => Ok(Self::Name),
            "mtime" => Ok(Self::Mtime),
            other => Err(BurrowError::invalid(format!(
                "sort_by must be one of: name, mtime (got '{other}')"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FindOptions {
    pub search_text: String,
    pub file_pattern: String,
    pub case_sensitive: bool,
    pub whole_word: bool,
    pub max_results: usize,
    pub sort_by: FindSort,
}

impl FindOptions {
    pub fn new(search_text: impl Into<String>) -> Self {
        Self {
            search_text: search_text.into(),
            file_pattern: consts::find::FILE_PATTERN.to_string(),
            case_sensitive: true,
            whole_word: false,
            max_results: consts::find::MAX_RESULTS,
            sort_by: FindSort::default(),
        }
    }
}

enum TextMatcher {
    Exact(String),
    /// Needle already lower-cased
    IgnoreCase(String),
    Word(Regex),
}

impl TextMatcher {
    fn new(options: &FindOptions) -> Result<Self> {
        let text = &options.search_text;
        if options.whole_word {
            let regex = RegexBuilder::new(&format!(r"\b{}\b", regex::escape(text)))
                .case_insensitive(!options.case_sensitive)
                .build()
                .map_err(|e| BurrowError::invalid(format!("search_text is too large: {e}")))?;
            Ok(Self::Word(regex))
        } else if options.case_sensitive {
            Ok(Self::Exact(text.clone()))
        } else {
            Ok(Self::IgnoreCase(text.to_lowercase()))
        }
    }

    fn is_match(&self, content: &str) -> bool {
        match self {
            Self::Exact(needle) => content.contains(needle.as_str()),
            Self::IgnoreCase(needle) => content.to_lowercase().contains(needle.as_str()),
            Self::Word(regex) => regex.is_match(content),
        }
    }
}

/// Workspace-relative paths of files containing `options.search_text`
///
/// Scanning stops once `max_results` files matched; unreadable files are
/// skipped.
pub fn find(workspace: &Workspace, options: &FindOptions) -> Result<Vec<String>> {
    if options.search_text.is_empty() {
        return Err(BurrowError::invalid("search_text must not be empty"));
    }
    require_pattern("file_pattern", &options.file_pattern)?;
    let max_results = require_positive("max_results", options.max_results)?;
    let matcher = TextMatcher::new(options)?;

    let validator = workspace.validator();
    let mut hits = Vec::new();
    let candidates = expand(
        workspace,
        &validator,
        &options.file_pattern,
        SEARCH_MATCH_OPTIONS,
    )?;
    for candidate in candidates {
        if !candidate.path.is_file() {
            continue;
        }
        let bytes = match std::fs::read(&candidate.path) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::debug!(path = %candidate.relative, "skipping unreadable file: {}", e);
                continue;
            }
        };
        if !matcher.is_match(&decode_lossy(&bytes)) {
            continue;
        }

        let stat = Stat::of(&candidate.path)
            .map(|(stat, _)| stat)
            .unwrap_or_default();
        hits.push((candidate.relative, stat));
        if hits.len() >= max_results {
            break;
        }
    }

    hits.sort_by_cached_key(|(relative, _)| relative.to_lowercase());
    if options.sort_by == FindSort::Mtime {
        hits.sort_by_key(|(_, stat)| Reverse(stat.mtime()));
    }
    Ok(hits.into_iter().map(|(relative, _)| relative).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use burrow_testkit::WorkspaceFixture;

    fn fixture() -> (WorkspaceFixture, Workspace) {
        let ws = WorkspaceFixture::new();
        ws.gitignore("", "secret/\n")
            .file("a.py", "def Login(user):\n    pass\n")
            .file("b.py", "login_user = 1\n")
            .file("docs/c.md", "Log in with your LOGIN.\n")
            .file("bin.dat", [0xffu8, b'l', b'o', b'g', b'i', b'n', 0xfe])
            .file("secret/d.py", "login\n");
        let workspace = Workspace::open(ws.root()).unwrap();
        (ws, workspace)
    }

    fn run(workspace: &Workspace, options: FindOptions) -> Vec<String> {
        find(workspace, &options).unwrap()
    }

    #[test]
    fn test_case_sensitive_literal() {
        let (_ws, workspace) = fixture();
        assert_eq!(run(&workspace, FindOptions::new("login")), ["b.py", "bin.dat"]);
        assert_eq!(run(&workspace, FindOptions::new("Login")), ["a.py"]);
    }

    #[test]
    fn test_case_insensitive() {
        let (_ws, workspace) = fixture();
        let options = FindOptions {
            case_sensitive: false,
            ..FindOptions::new("LOGIN")
        };
        assert_eq!(run(&workspace, options), ["a.py", "b.py", "bin.dat", "docs/c.md"]);
    }

    #[test]
    fn test_whole_word() {
        let (_ws, workspace) = fixture();
        let options = FindOptions {
            whole_word: true,
            case_sensitive: false,
            ..FindOptions::new("login")
        };
        // `login_user` is one word; `\xfflogin\xfe` decodes to a bare `login`
        assert_eq!(run(&workspace, options), ["a.py", "bin.dat", "docs/c.md"]);
    }

    #[test]
    fn test_file_pattern_and_cap() {
        let (_ws, workspace) = fixture();
        let options = FindOptions {
            file_pattern: "**/*.py".to_string(),
            case_sensitive: false,
            ..FindOptions::new("login")
        };
        assert_eq!(run(&workspace, options.clone()), ["a.py", "b.py"]);

        let capped = FindOptions {
            max_results: 1,
            ..options
        };
        assert_eq!(run(&workspace, capped).len(), 1);
    }

    #[test]
    fn test_dot_files_are_searched() {
        let ws = WorkspaceFixture::new();
        ws.file(".github/workflows/ci.yml", "# TODO pin versions\n")
            .file(".eslintrc", "// TODO\n")
            .file("src/a.txt", "TODO\n")
            .file(".git/TODO_MSG", "TODO\n");
        let workspace = Workspace::open(ws.root()).unwrap();
        assert_eq!(
            run(&workspace, FindOptions::new("TODO")),
            [".eslintrc", ".github/workflows/ci.yml", "src/a.txt"]
        );
    }

    #[test]
    fn test_absolute_file_pattern_reports_relative_paths() {
        let (_ws, workspace) = fixture();
        let options = FindOptions {
            file_pattern: format!("{}/**/*.md", workspace.root().display()),
            case_sensitive: false,
            ..FindOptions::new("login")
        };
        assert_eq!(run(&workspace, options), ["docs/c.md"]);
    }

    #[test]
    fn test_invalid_options() {
        let (_ws, workspace) = fixture();
        let zero = FindOptions {
            max_results: 0,
            ..FindOptions::new("x")
        };
        let bad_glob = FindOptions {
            file_pattern: "[".to_string(),
            ..FindOptions::new("x")
        };
        for options in [zero, bad_glob, FindOptions::new("")] {
            assert_eq!(find(&workspace, &options).unwrap_err().code(), "INVALID_PARAMETER");
        }
        assert!("size".parse::<FindSort>().is_err());
    }
}
