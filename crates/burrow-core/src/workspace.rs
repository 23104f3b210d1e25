use crate::error::{BurrowError, Result};
use crate::ignore_rules::IgnoreRuleSet;
use crate::path::PathValidator;
use std::path::{Component, Path, PathBuf};

/// The fixed sandbox root every operation is confined to
///
/// Immutable once opened; cheap to clone and safe to share across threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Opens `root`, resolving it to an absolute canonical directory
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let requested = root.as_ref();
        let display = requested.display().to_string();
        let root = requested.canonicalize().map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => BurrowError::NotFound(display.clone()),
            std::io::ErrorKind::PermissionDenied => BurrowError::PermissionDenied(display.clone()),
            _ => BurrowError::Io(e),
        })?;
        if !root.is_dir() {
            return Err(BurrowError::NotADirectory(display));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Final component of the root, used as the label of rendered trees
    pub fn name(&self) -> String {
        self.root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.root.display().to_string())
    }

    /// The `pwd` operation
    pub fn pwd(&self) -> String {
        self.root.display().to_string()
    }

    /// Builds a fresh validator, discovering `.gitignore` files now
    pub fn validator(&self) -> PathValidator {
        PathValidator::new(&self.root, IgnoreRuleSet::discover(&self.root))
    }

    /// `/`-joined path of `path` relative to the root, if it lies below it
    pub fn relative(&self, path: &Path) -> Option<String> {
        let rel = path.strip_prefix(&self.root).ok()?;
        let parts: Vec<_> = rel
            .components()
            .filter_map(|c| match c {
                Component::Normal(name) => Some(name.to_string_lossy()),
                _ => None,
            })
            .collect();
        if parts.is_empty() {
            return Some(".".to_string());
        }
        Some(parts.join("/"))
    }
}
