//! Nested `.gitignore` discovery and matching
//!
//! Every `.gitignore` below the workspace root becomes one [`IgnoreRule`]
//! scoped to the directory that contains it. A path is ignored when any rule
//! whose scope is an ancestor of the path matches it. A `!pattern` in one
//! file only affects that file's own patterns; it never re-includes a path
//! that a rule from another scope already ignores.
//!
//! Rule sets are discovered once per operation call and dropped with it.
//! Nothing is cached between calls, so edits to `.gitignore` files are
//! visible to the very next call.

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const GITIGNORE: &str = ".gitignore";

/// Compiled patterns of a single `.gitignore` file
#[derive(Debug, Clone)]
pub struct IgnoreRule {
    scope: PathBuf,
    matcher: Gitignore,
}

impl IgnoreRule {
    /// Compiles `contents` as gitignore patterns anchored at `scope`
    ///
    /// Blank lines and `#` comments are skipped; lines the matcher cannot
    /// parse are skipped individually.
    pub fn compile(scope: &Path, contents: &str) -> Self {
        let mut builder = GitignoreBuilder::new(scope);
        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Err(e) = builder.add_line(None, line) {
                tracing::debug!(scope = %scope.display(), line, "skipping ignore pattern: {}", e);
            }
        }

        let matcher = builder.build().unwrap_or_else(|e| {
            tracing::debug!(scope = %scope.display(), "ignore rules failed to build: {}", e);
            Gitignore::empty()
        });

        Self {
            scope: scope.to_path_buf(),
            matcher,
        }
    }

    /// Directory containing the `.gitignore` this rule came from
    pub fn scope(&self) -> &Path {
        &self.scope
    }

    /// Whether this rule ignores `path` or one of its parent directories
    ///
    /// Only paths strictly below the scope directory can match.
    pub fn ignores(&self, path: &Path, is_dir: bool) -> bool {
        let Ok(relative) = path.strip_prefix(&self.scope) else {
            return false;
        };
        if relative.as_os_str().is_empty() {
            return false;
        }
        self.matcher
            .matched_path_or_any_parents(relative, is_dir)
            .is_ignore()
    }
}

/// All ignore rules of one workspace, shallowest scope first
#[derive(Debug, Clone, Default)]
pub struct IgnoreRuleSet {
    rules: Vec<IgnoreRule>,
}

impl IgnoreRuleSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Walks `root` once and compiles every `.gitignore` found
    ///
    /// Symlinks are not followed and `.git` is never entered. A file that
    /// cannot be read or is not UTF-8 compiles to an empty rule.
    pub fn discover(root: &Path) -> Self {
        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.file_name() != ".git");

        let mut rules = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!("skipping unreadable entry during ignore discovery: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_file() || entry.file_name() != GITIGNORE {
                continue;
            }
            let Some(scope) = entry.path().parent() else {
                continue;
            };
            let contents = std::fs::read(entry.path())
                .ok()
                .and_then(|bytes| String::from_utf8(bytes).ok())
                .unwrap_or_default();
            rules.push((entry.depth(), IgnoreRule::compile(scope, &contents)));
        }

        rules.sort_by_key(|(depth, _)| *depth);
        Self {
            rules: rules.into_iter().map(|(_, rule)| rule).collect(),
        }
    }

    /// First rule reporting an ignore match wins
    pub fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        self.rules.iter().any(|rule| rule.ignores(path, is_dir))
    }

    pub fn rules(&self) -> &[IgnoreRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burrow_testkit::WorkspaceFixture;

    #[test]
    fn test_rule_is_scoped_to_its_directory() {
        let ws = WorkspaceFixture::new();
        ws.gitignore("d", "*.log\n")
            .file("d/a.log", "")
            .file("d2/a.log", "");

        let rules = IgnoreRuleSet::discover(ws.root());
        assert_eq!(rules.len(), 1);
        assert!(rules.is_ignored(&ws.path("d/a.log"), false));
        assert!(!rules.is_ignored(&ws.path("d2/a.log"), false));
    }

    #[test]
    fn test_deeper_negation_does_not_reinclude() {
        let ws = WorkspaceFixture::new();
        ws.gitignore("", "*.log\n")
            .gitignore("sub", "!keep.log\n")
            .file("sub/keep.log", "");

        let rules = IgnoreRuleSet::discover(ws.root());
        assert!(rules.is_ignored(&ws.path("sub/keep.log"), false));
    }

    #[test]
    fn test_negation_within_one_file() {
        let ws = WorkspaceFixture::new();
        ws.gitignore("", "*.log\n!keep.log\n");

        let rules = IgnoreRuleSet::discover(ws.root());
        assert!(rules.is_ignored(&ws.path("drop.log"), false));
        assert!(!rules.is_ignored(&ws.path("keep.log"), false));
    }

    #[test]
    fn test_directory_pattern_hides_contents() {
        let ws = WorkspaceFixture::new();
        ws.gitignore("", "# build output\n\nbuild/\n")
            .file("build/out/x.txt", "");

        let rules = IgnoreRuleSet::discover(ws.root());
        assert!(rules.is_ignored(&ws.path("build"), true));
        assert!(rules.is_ignored(&ws.path("build/out/x.txt"), false));
        assert!(!rules.is_ignored(&ws.path("src"), true));
    }

    #[test]
    fn test_scope_directory_itself_is_not_matched() {
        let ws = WorkspaceFixture::new();
        ws.gitignore("logs", "*\n");

        let rules = IgnoreRuleSet::discover(ws.root());
        assert!(!rules.is_ignored(&ws.path("logs"), true));
        assert!(rules.is_ignored(&ws.path("logs/today.txt"), false));
    }

    #[test]
    fn test_git_directory_is_not_scanned() {
        let ws = WorkspaceFixture::new();
        ws.gitignore(".git", "*\n").file("a.txt", "");

        let rules = IgnoreRuleSet::discover(ws.root());
        assert!(rules.is_empty());
    }

    #[test]
    fn test_non_utf8_gitignore_compiles_empty() {
        let ws = WorkspaceFixture::new();
        ws.file(".gitignore", [0xff, 0xfe, b'*', b'\n']);

        let rules = IgnoreRuleSet::discover(ws.root());
        assert_eq!(rules.len(), 1);
        assert!(!rules.is_ignored(&ws.path("a.txt"), false));
    }
}
