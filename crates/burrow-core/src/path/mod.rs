//! Sandbox path validation
//!
//! Every path handed to an operation is untrusted input. [`PathValidator`]
//! turns it into a [`ValidatedPath`] or a [`Rejected`] and nothing else:
//! validation is total, never panics and never surfaces a raw I/O error.
//!
//! ## Resolution
//!
//! 1. An empty path means the base directory. Relative paths are joined onto
//!    the base; absolute paths are taken as given.
//! 2. `.` and `..` are folded lexically.
//! 3. Symlinks are resolved by canonicalizing the longest existing prefix.
//! 4. The result must equal the base or lie below it.
//! 5. A `.git` component anywhere below the workspace root rejects, whether
//!    or not the ignore check is enabled.
//! 6. With the ignore check enabled, a match in the [`IgnoreRuleSet`]
//!    rejects. Both the requested location and its symlink target are
//!    checked.
//!
//! ```rust
//! use burrow_core::path::PathValidator;
//! use burrow_core::ignore_rules::IgnoreRuleSet;
//!
//! let root = std::env::temp_dir().canonicalize().unwrap();
//! let validator = PathValidator::new(&root, IgnoreRuleSet::empty());
//!
//! assert!(validator.validate(".").is_ok());
//! assert!(validator.validate("../../..").is_err() || root.parent().is_none());
//! ```

use crate::ignore_rules::IgnoreRuleSet;
use std::fmt;
use std::io;
use std::ops::Deref;
use std::path::{Component, Path, PathBuf};

/// An absolute path proven to exist inside the workspace and not excluded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPath(PathBuf);

impl ValidatedPath {
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl Deref for ValidatedPath {
    type Target = Path;

    fn deref(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for ValidatedPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

/// Validation failure
///
/// Carries no detail on purpose: callers must not learn whether a path
/// escaped the sandbox, is ignored, or simply does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rejected;

impl fmt::Display for Rejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("outside workspace or excluded")
    }
}

impl std::error::Error for Rejected {}

/// Outcome of [`PathValidator::locate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    pub path: PathBuf,
    pub exists: bool,
}

/// Resolves caller-supplied paths against one workspace root
#[derive(Debug, Clone)]
pub struct PathValidator {
    root: PathBuf,
    rules: IgnoreRuleSet,
}

impl PathValidator {
    /// `root` must already be canonical (see [`crate::Workspace::open`])
    pub fn new(root: &Path, rules: IgnoreRuleSet) -> Self {
        Self {
            root: root.to_path_buf(),
            rules,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn rules(&self) -> &IgnoreRuleSet {
        &self.rules
    }

    /// Validates `path` against the workspace root with the ignore check on
    pub fn validate(&self, path: impl AsRef<Path>) -> Result<ValidatedPath, Rejected> {
        self.validate_in(path, &self.root, true)
    }

    /// Validates `path` relative to, and confined by, `base`
    pub fn validate_in(
        &self,
        path: impl AsRef<Path>,
        base: &Path,
        check_ignore: bool,
    ) -> Result<ValidatedPath, Rejected> {
        let located = self.resolve(path.as_ref(), base, check_ignore)?;
        if !located.exists {
            return Err(Rejected);
        }
        Ok(ValidatedPath(located.path))
    }

    /// Shorthand for `validate(path).is_ok()`
    pub fn accepts(&self, path: impl AsRef<Path>) -> bool {
        self.validate(path).is_ok()
    }

    /// Like [`validate`](Self::validate) but a missing path is not a rejection
    ///
    /// Used where "does not exist" must be told apart from "outside the
    /// workspace".
    pub fn locate(&self, path: impl AsRef<Path>) -> Result<Located, Rejected> {
        self.resolve(path.as_ref(), &self.root, true)
    }

    fn resolve(&self, path: &Path, base: &Path, check_ignore: bool) -> Result<Located, Rejected> {
        let base = base.canonicalize().map_err(|_| Rejected)?;

        let joined = if path.as_os_str().is_empty() {
            base.clone()
        } else if path.is_absolute() {
            path.to_path_buf()
        } else {
            base.join(path)
        };
        let lexical = normalize_lexically(&joined);
        let (resolved, exists) = canonicalize_existing_prefix(&lexical).map_err(|_| Rejected)?;

        if !resolved.starts_with(&base) {
            return Err(Rejected);
        }

        let is_dir = exists && resolved.is_dir();
        for candidate in [&lexical, &resolved] {
            if self.is_excluded(candidate, &base, check_ignore, is_dir) {
                return Err(Rejected);
            }
        }

        Ok(Located {
            path: resolved,
            exists,
        })
    }

    fn is_excluded(&self, path: &Path, base: &Path, check_ignore: bool, is_dir: bool) -> bool {
        let relative = match path.strip_prefix(&self.root) {
            Ok(rel) => rel,
            Err(_) => match path.strip_prefix(base) {
                Ok(rel) => rel,
                // Lexical path outside the root whose target is inside it
                // (e.g. an absolute symlink path); the target is checked
                // on its own.
                Err(_) => return false,
            },
        };

        if has_git_component(relative) {
            return true;
        }
        check_ignore && self.rules.is_ignored(path, is_dir)
    }
}

/// Whether any component of `path` is exactly `.git`
pub fn has_git_component(path: &Path) -> bool {
    path.components()
        .any(|c| matches!(c, Component::Normal(name) if name == ".git"))
}

/// Folds `.` and `..` without touching the filesystem
///
/// `..` at the root stays at the root, matching how the OS resolves it.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let at_root = matches!(
                    out.components().next_back(),
                    None | Some(Component::RootDir) | Some(Component::Prefix(_))
                );
                if !at_root {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Canonicalizes the longest existing prefix of `path`
///
/// Returns the resolved path and whether the full path exists. Missing
/// trailing components are appended verbatim. Failures other than
/// "not found" (permissions, loops) are returned as errors.
fn canonicalize_existing_prefix(path: &Path) -> io::Result<(PathBuf, bool)> {
    match path.canonicalize() {
        Ok(resolved) => return Ok((resolved, true)),
        Err(e) if e.kind() != io::ErrorKind::NotFound => return Err(e),
        Err(_) => {}
    }

    let mut missing = Vec::new();
    let mut current = path;
    while let Some(parent) = current.parent() {
        if let Some(name) = current.file_name() {
            missing.push(name.to_os_string());
        }
        match parent.canonicalize() {
            Ok(mut resolved) => {
                for name in missing.iter().rev() {
                    resolved.push(name);
                }
                return Ok((resolved, false));
            }
            Err(e) if e.kind() != io::ErrorKind::NotFound => return Err(e),
            Err(_) => current = parent,
        }
    }

    Err(io::Error::new(io::ErrorKind::NotFound, "no existing ancestor"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use burrow_testkit::WorkspaceFixture;

    fn validator_for(ws: &WorkspaceFixture) -> PathValidator {
        let root = ws.root().canonicalize().unwrap();
        let rules = IgnoreRuleSet::discover(&root);
        PathValidator::new(&root, rules)
    }

    #[test]
    fn test_normalize_lexically() {
        assert_eq!(
            normalize_lexically(Path::new("/a/./b/../c")),
            PathBuf::from("/a/c")
        );
        assert_eq!(normalize_lexically(Path::new("/../..")), PathBuf::from("/"));
        assert_eq!(normalize_lexically(Path::new("a/../../b")), PathBuf::from("b"));
    }

    #[test]
    fn test_accepts_root_and_children() {
        let ws = WorkspaceFixture::new();
        ws.file("src/lib.rs", "");
        let validator = validator_for(&ws);

        assert_eq!(validator.validate("").unwrap().as_path(), validator.root());
        assert_eq!(validator.validate(".").unwrap().as_path(), validator.root());
        assert!(validator.accepts("src/lib.rs"));
        assert!(validator.accepts(validator.root().join("src")));
    }

    #[test]
    fn test_rejects_escape() {
        let ws = WorkspaceFixture::new();
        let validator = validator_for(&ws);

        assert_eq!(validator.validate(".."), Err(Rejected));
        assert_eq!(validator.validate("../../etc/passwd"), Err(Rejected));
        assert_eq!(validator.validate("/"), Err(Rejected));
        assert_eq!(validator.validate("src/../../x"), Err(Rejected));
    }

    #[test]
    fn test_rejects_missing_but_locates_it() {
        let ws = WorkspaceFixture::new();
        let validator = validator_for(&ws);

        assert_eq!(validator.validate("missing/file.txt"), Err(Rejected));
        let located = validator.locate("missing/file.txt").unwrap();
        assert!(!located.exists);
        assert_eq!(located.path, validator.root().join("missing/file.txt"));
        assert_eq!(validator.locate("../missing"), Err(Rejected));
    }

    #[test]
    fn test_git_always_rejected() {
        let ws = WorkspaceFixture::new();
        ws.file(".git/config", "").file("vendor/.git/HEAD", "");
        let validator = validator_for(&ws);

        assert!(!validator.accepts(".git"));
        assert!(!validator.accepts(".git/config"));
        assert!(!validator.accepts("vendor/.git/HEAD"));
        let root = validator.root().to_path_buf();
        assert!(validator.validate_in(".git/config", &root, false).is_err());
    }

    #[test]
    fn test_ignore_check_can_be_disabled() {
        let ws = WorkspaceFixture::new();
        ws.gitignore("", "*.log\n").file("a.log", "");
        let validator = validator_for(&ws);
        let root = validator.root().to_path_buf();

        assert!(!validator.accepts("a.log"));
        assert!(validator.validate_in("a.log", &root, false).is_ok());
    }

    #[test]
    fn test_custom_base_confines() {
        let ws = WorkspaceFixture::new();
        ws.file("sub/a.txt", "").file("b.txt", "");
        let validator = validator_for(&ws);
        let base = validator.root().join("sub");

        assert!(validator.validate_in("a.txt", &base, true).is_ok());
        assert!(validator.validate_in("../b.txt", &base, true).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks() {
        let outside = WorkspaceFixture::new();
        outside.file("secret.txt", "s");
        let ws = WorkspaceFixture::new();
        ws.file("real.txt", "r")
            .gitignore("", "hidden.txt\n")
            .file("hidden.txt", "h")
            .symlink(outside.path("secret.txt"), "escape.txt")
            .symlink(ws.path("real.txt"), "inside.txt")
            .symlink(ws.path("hidden.txt"), "alias.txt")
            .symlink(ws.path("real.txt"), "hidden.txt.bak")
            .symlink(ws.path("nowhere"), "dangling");
        let validator = validator_for(&ws);

        assert!(!validator.accepts("escape.txt"));
        assert_eq!(
            validator.validate("inside.txt").unwrap().as_path(),
            validator.root().join("real.txt")
        );
        assert!(!validator.accepts("alias.txt"), "target is ignored");
        assert!(validator.accepts("hidden.txt.bak"));
        assert!(!validator.accepts("dangling"));
    }
}
