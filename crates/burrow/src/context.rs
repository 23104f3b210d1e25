//! Global context for CLI commands

use anyhow::{Context as _, Result};
use burrow_core::Workspace;
use burrow_core::config::Config;
use std::env;
use std::path::PathBuf;

/// Workspace and its configuration
pub struct Context {
    pub workspace: Workspace,
    pub config: Config,
}

impl Context {
    /// Opens the workspace at `root` (or the current directory) and loads `burrow.toml`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The root does not exist or is not a directory
    /// - `burrow.toml` cannot be read or is invalid
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = match root {
            Some(root) => root,
            None => env::current_dir().context("Failed to determine current directory")?,
        };
        let workspace = Workspace::open(&root)
            .with_context(|| format!("Failed to open workspace {}", root.display()))?;
        let config = Config::load(workspace.root())?;
        tracing::debug!(root = %workspace.root().display(), "workspace opened");
        Ok(Self { workspace, config })
    }
}
