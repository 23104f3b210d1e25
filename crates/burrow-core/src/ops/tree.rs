//! Bounded ASCII directory tree

use crate::config::consts;
use crate::error::{require_positive, BurrowError, Result};
use crate::path::PathValidator;
use crate::workspace::Workspace;
use std::path::{Path, PathBuf};

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

#[derive(Debug, Clone)]
pub struct TreeOptions {
    pub path: String,
    pub max_depth: usize,
    pub include_files: bool,
    pub max_entries: usize,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            path: ".".to_string(),
            max_depth: consts::tree::MAX_DEPTH,
            include_files: true,
            max_entries: consts::tree::MAX_ENTRIES,
        }
    }
}

/// Renders the tree under `options.path`
///
/// The first line is the root label. At most `max_entries` entry lines
/// follow, plus a `└── …` marker when entries were cut.
pub fn tree(workspace: &Workspace, options: &TreeOptions) -> Result<String> {
    let max_depth = require_positive("max_depth", options.max_depth)?;
    let max_entries = require_positive("max_entries", options.max_entries)?;

    let validator = workspace.validator();
    let located = validator
        .locate(&options.path)
        .map_err(|_| BurrowError::rejected(&options.path))?;
    if !located.exists {
        return Err(BurrowError::NotFound(options.path.clone()));
    }
    if !located.path.is_dir() {
        return Err(BurrowError::NotADirectory(options.path.clone()));
    }

    let renderer = TreeRenderer {
        validator: &validator,
        max_depth,
        only_directories: !options.include_files,
        limit: max_entries.saturating_add(1),
    };
    let mut body = renderer.render(&located.path);
    let truncated = body.len() > max_entries;
    body.truncate(max_entries);

    let mut lines = Vec::with_capacity(body.len() + 2);
    lines.push(root_label(workspace, &options.path));
    lines.extend(body);
    if truncated {
        lines.push(consts::tree::TRUNCATION_MARKER.to_string());
    }
    Ok(lines.join("\n"))
}

fn root_label(workspace: &Workspace, path: &str) -> String {
    let trimmed = path.trim_end_matches(['/', '\\']);
    if trimmed.is_empty() || trimmed == "." {
        format!("{}/", workspace.name())
    } else {
        format!("{trimmed}/")
    }
}

/// Depth-first renderer producing header-less entry lines
///
/// Hidden entries and entries the validator rejects are left out; symlinked
/// directories are listed but never entered. Stops after `limit` lines.
pub struct TreeRenderer<'a> {
    pub validator: &'a PathValidator,
    pub max_depth: usize,
    pub only_directories: bool,
    pub limit: usize,
}

struct Child {
    name: String,
    path: PathBuf,
    is_dir: bool,
    is_symlink: bool,
}

impl TreeRenderer<'_> {
    pub fn render(&self, directory: &Path) -> Vec<String> {
        let mut lines = Vec::new();
        self.walk(directory, "", 1, &mut lines);
        lines
    }

    fn walk(&self, dir: &Path, prefix: &str, depth: usize, lines: &mut Vec<String>) {
        let children = self.children(dir);
        let count = children.len();
        for (i, child) in children.into_iter().enumerate() {
            if lines.len() >= self.limit {
                return;
            }
            let last = i + 1 == count;
            let connector = if last { LAST_BRANCH } else { BRANCH };
            if child.is_dir {
                lines.push(format!("{prefix}{connector}{}/", child.name));
            } else {
                lines.push(format!("{prefix}{connector}{}", child.name));
            }

            if child.is_dir && !child.is_symlink && depth < self.max_depth {
                let extension = if last { SPACE } else { PIPE };
                self.walk(&child.path, &format!("{prefix}{extension}"), depth + 1, lines);
            }
        }
    }

    fn children(&self, dir: &Path) -> Vec<Child> {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!(dir = %dir.display(), "cannot read directory: {}", e);
                return Vec::new();
            }
        };

        let mut children: Vec<Child> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().into_owned();
                if name.starts_with('.') {
                    return None;
                }
                let path = entry.path();
                if !self.validator.accepts(&path) {
                    return None;
                }
                let is_symlink = entry.file_type().map(|t| t.is_symlink()).unwrap_or(false);
                let is_dir = path.is_dir();
                if self.only_directories && !is_dir {
                    return None;
                }
                Some(Child {
                    name,
                    path,
                    is_dir,
                    is_symlink,
                })
            })
            .collect();
        children.sort_by_cached_key(|c| c.name.to_lowercase());
        children
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burrow_testkit::WorkspaceFixture;

    fn fixture() -> (WorkspaceFixture, Workspace) {
        let ws = WorkspaceFixture::new();
        ws.gitignore("", "target/\n")
            .file("src/main.rs", "")
            .file("src/util/helpers.rs", "")
            .file("README.md", "")
            .file(".env", "")
            .file("target/debug/app", "")
            .dir("docs");
        let workspace = Workspace::open(ws.root()).unwrap();
        (ws, workspace)
    }

    #[test]
    fn test_default_tree() {
        let (_ws, workspace) = fixture();
        let text = tree(&workspace, &TreeOptions::default()).unwrap();
        let expected = format!(
            "{}/\n├── docs/\n├── README.md\n└── src/\n    ├── main.rs\n    └── util/",
            workspace.name()
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_depth_one_has_no_grandchildren() {
        let (_ws, workspace) = fixture();
        let options = TreeOptions {
            max_depth: 1,
            ..Default::default()
        };
        let text = tree(&workspace, &options).unwrap();
        assert_eq!(text.lines().count(), 4);
        assert!(!text.contains("main.rs"));
    }

    #[test]
    fn test_directories_only_and_subpath() {
        let (_ws, workspace) = fixture();
        let options = TreeOptions {
            path: "src/".to_string(),
            include_files: false,
            max_depth: 5,
            ..Default::default()
        };
        assert_eq!(tree(&workspace, &options).unwrap(), "src/\n└── util/");
    }

    #[test]
    fn test_truncation_marker_only_when_cut() {
        let (_ws, workspace) = fixture();
        let cut = TreeOptions {
            max_entries: 2,
            ..Default::default()
        };
        let lines: Vec<String> = tree(&workspace, &cut)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[3], "└── …");

        let exact = TreeOptions {
            max_entries: 5,
            ..Default::default()
        };
        assert!(!tree(&workspace, &exact).unwrap().contains('…'));
    }

    #[test]
    fn test_unbounded_entry_cap() {
        let (_ws, workspace) = fixture();
        let options = TreeOptions {
            max_entries: usize::MAX,
            ..Default::default()
        };
        let text = tree(&workspace, &options).unwrap();
        assert_eq!(text, tree(&workspace, &TreeOptions::default()).unwrap());
        assert!(!text.contains('…'));
    }

    #[test]
    fn test_error_kinds() {
        let (_ws, workspace) = fixture();
        let err = |path: &str| {
            let options = TreeOptions {
                path: path.to_string(),
                ..Default::default()
            };
            tree(&workspace, &options).unwrap_err().code()
        };
        assert_eq!(err("../"), "PATH_REJECTED");
        assert_eq!(err("target"), "PATH_REJECTED");
        assert_eq!(err("missing"), "NOT_FOUND");
        assert_eq!(err("README.md"), "NOT_A_DIRECTORY");

        let zero = TreeOptions {
            max_depth: 0,
            ..Default::default()
        };
        assert_eq!(tree(&workspace, &zero).unwrap_err().code(), "INVALID_PARAMETER");
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directory_is_not_entered() {
        let (ws, workspace) = fixture();
        ws.symlink(ws.path("src"), "alias");
        let options = TreeOptions {
            max_depth: 3,
            ..Default::default()
        };
        let text = tree(&workspace, &options).unwrap();
        assert!(text.contains("├── alias/\n├── docs/"));
        assert_eq!(text.matches("main.rs").count(), 1);
    }
}
