use crate::context::McpContext;
use crate::handlers::fs::FsTool;
use burrow_core::Workspace;
use burrow_core::config::Config;
use burrow_core::syntax::{self, SyntaxEngine};
use rmcp::{
    ServerHandler, ServiceExt,
    handler::server::router::tool::ToolRouter,
    model::{ServerCapabilities, ServerInfo},
    tool_handler,
    transport::stdio,
};
use std::path::PathBuf;
use std::sync::Arc;

const INSTRUCTIONS: &str = "Read-only access to a single workspace directory. \
Use 'tree' or 'ls' to explore, 'glob' and 'find' to locate files, 'ast_grep' for \
structural code search and 'read_files' to read content. Paths are relative to the \
workspace root; anything outside it, under .git, or excluded by .gitignore is refused.";

#[derive(Clone)]
pub struct BurrowServer {
    pub context: McpContext,
    pub engine: Arc<dyn SyntaxEngine>,
    pub tool_router: ToolRouter<BurrowServer>,
}

impl BurrowServer {
    pub fn new(context: McpContext) -> Self {
        Self::with_engine(context, Arc::from(syntax::default_engine()))
    }

    /// Server with a specific structural search engine
    pub fn with_engine(context: McpContext, engine: Arc<dyn SyntaxEngine>) -> Self {
        Self {
            context,
            engine,
            tool_router: FsTool.into_router(),
        }
    }

    /// Serves the workspace at `root` over stdin/stdout until the client disconnects
    pub async fn run_stdio_server(root: PathBuf) -> anyhow::Result<()> {
        let workspace = Workspace::open(&root)?;
        let config = Config::load(workspace.root())?;
        tracing::info!(root = %workspace.root().display(), "starting burrow MCP server");

        let server = Self::new(McpContext::new(workspace, config));
        let service = server.serve(stdio()).await.inspect_err(|e| {
            tracing::error!("MCP server error: {:?}", e);
        })?;

        tracing::info!("burrow MCP server ready");
        service.waiting().await?;
        tracing::info!("burrow MCP server shutting down");
        Ok(())
    }
}

#[tool_handler]
impl ServerHandler for BurrowServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
