use burrow_core::Workspace;
use burrow_core::config::Config;

/// Per-server state shared by every tool call
#[derive(Clone, Debug)]
pub struct McpContext {
    pub workspace: Workspace,
    pub config: Config,
}

impl McpContext {
    pub fn new(workspace: Workspace, config: Config) -> Self {
        Self { workspace, config }
    }

    /// Context with the default configuration
    pub fn with_defaults(workspace: Workspace) -> Self {
        Self::new(workspace, Config::default())
    }
}
