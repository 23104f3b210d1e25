use anyhow::{Context, Result};
use burrow_mcp::BurrowServer;
use std::path::PathBuf;

/// Run MCP server in stdio mode
pub fn run_stdio(root: Option<PathBuf>) -> Result<()> {
    let root = match root {
        Some(root) => root,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    // We need a tokio runtime for the server
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?;

    rt.block_on(BurrowServer::run_stdio_server(root))
}
