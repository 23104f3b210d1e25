//! Test utilities for burrow
//!
//! This crate provides shared testing utilities used across the burrow workspace.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Creates a temporary directory within `.tmp/` at the crate root
///
/// All test workspaces are centralized in a single location that is
/// gitignored and easy to clean up manually if needed.
///
/// # Panics
///
/// Panics if:
/// - Unable to determine current directory
/// - Unable to create `.tmp/` directory
/// - Unable to create temporary subdirectory
///
/// # Examples
///
/// ```rust
/// use burrow_testkit::temp_dir_in_workspace;
///
/// let temp = temp_dir_in_workspace();
/// let file_path = temp.path().join("test.txt");
/// std::fs::write(&file_path, "test data").unwrap();
/// // Cleanup happens automatically when temp is dropped
/// ```
pub fn temp_dir_in_workspace() -> TempDir {
    try_temp_dir_in_workspace().expect("Failed to create temporary directory in .tmp/")
}

/// Alternative with Result for non-test code
pub fn try_temp_dir_in_workspace() -> std::io::Result<TempDir> {
    let tmp_base = std::env::current_dir()?.join(".tmp");
    std::fs::create_dir_all(&tmp_base)?;
    // Not dot-prefixed: tree renders the root directory name as its label.
    tempfile::Builder::new().prefix("ws-").tempdir_in(&tmp_base)
}

/// Builder for a throwaway workspace tree
///
/// Every helper creates missing parent directories and panics on failure,
/// so tests can lay out a tree in a few chained calls:
///
/// ```rust
/// use burrow_testkit::WorkspaceFixture;
///
/// let ws = WorkspaceFixture::new();
/// ws.file("src/main.py", "print('hi')\n")
///     .gitignore("", "*.log\n")
///     .dir("empty");
/// assert!(ws.path("src/main.py").is_file());
/// ```
pub struct WorkspaceFixture {
    dir: TempDir,
}

impl Default for WorkspaceFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkspaceFixture {
    pub fn new() -> Self {
        Self {
            dir: temp_dir_in_workspace(),
        }
    }

    /// Absolute path of the workspace root
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of `rel` inside the workspace
    pub fn path(&self, rel: &str) -> PathBuf {
        if rel.is_empty() {
            self.root().to_path_buf()
        } else {
            self.root().join(rel)
        }
    }

    pub fn file(&self, rel: &str, contents: impl AsRef<[u8]>) -> &Self {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, contents).expect("Failed to write fixture file");
        self
    }

    pub fn dir(&self, rel: &str) -> &Self {
        std::fs::create_dir_all(self.path(rel)).expect("Failed to create fixture directory");
        self
    }

    /// Writes `<dir>/.gitignore`; an empty `dir` means the workspace root
    pub fn gitignore(&self, dir: &str, contents: &str) -> &Self {
        let rel = if dir.is_empty() {
            ".gitignore".to_string()
        } else {
            format!("{}/.gitignore", dir.trim_end_matches('/'))
        };
        self.file(&rel, contents)
    }

    /// Creates a symlink at `link` pointing to `target` (taken verbatim)
    #[cfg(unix)]
    pub fn symlink(&self, target: impl AsRef<Path>, link: &str) -> &Self {
        let link_path = self.path(link);
        if let Some(parent) = link_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::os::unix::fs::symlink(target, &link_path).expect("Failed to create symlink");
        self
    }
}
