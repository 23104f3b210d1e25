//! Read-only workspace inspection tools

use crate::handlers::{Safety, ToolExt};
use crate::server::BurrowServer;
use futures_util::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::common::FromContextPart,
    handler::server::router::tool::{ToolRoute, ToolRouter},
    handler::server::wrapper::Parameters,
    model::*,
};
use std::borrow::Cow;

mod listing;
mod read;
mod search;
pub mod types;


pub use types::{
    AstGrepArgs, FindArgs, GlobArgs, LsArgs, PwdArgs, ReadFilesArgs, TreeArgs,
};

/// Tool names in registration order
pub const TOOL_NAMES: [&str; 7] = ["pwd", "ls", "glob", "find", "ast_grep", "tree", "read_files"];

pub struct FsTool;

impl FsTool {
    pub fn into_router(self) -> ToolRouter<BurrowServer> {
        ToolRouter::new()
            .with_route(ToolRoute::new_dyn(Self::pwd_attr(), |mut ctx| {
                let server = ctx.service;
                let args_res = Parameters::<PwdArgs>::from_context_part(&mut ctx);
                async move {
                    let Parameters(args) = args_res?;
                    listing::pwd(server, args).await
                }
                .boxed()
            }))
            .with_route(ToolRoute::new_dyn(Self::ls_attr(), |mut ctx| {
                let server = ctx.service;
                let args_res = Parameters::<LsArgs>::from_context_part(&mut ctx);
                async move {
                    let Parameters(args) = args_res?;
                    listing::ls(server, args).await
                }
                .boxed()
            }))
            .with_route(ToolRoute::new_dyn(Self::glob_attr(), |mut ctx| {
                let server = ctx.service;
                let args_res = Parameters::<GlobArgs>::from_context_part(&mut ctx);
                async move {
                    let Parameters(args) = args_res?;
                    search::glob(server, args).await
                }
                .boxed()
            }))
            .with_route(ToolRoute::new_dyn(Self::find_attr(), |mut ctx| {
                let server = ctx.service;
                let args_res = Parameters::<FindArgs>::from_context_part(&mut ctx);
                async move {
                    let Parameters(args) = args_res?;
                    search::find(server, args).await
                }
                .boxed()
            }))
            .with_route(ToolRoute::new_dyn(Self::ast_grep_attr(), |mut ctx| {
                let server = ctx.service;
                let args_res = Parameters::<AstGrepArgs>::from_context_part(&mut ctx);
                async move {
                    let Parameters(args) = args_res?;
                    search::ast_grep(server, args).await
                }
                .boxed()
            }))
            .with_route(ToolRoute::new_dyn(Self::tree_attr(), |mut ctx| {
                let server = ctx.service;
                let args_res = Parameters::<TreeArgs>::from_context_part(&mut ctx);
                async move {
                    let Parameters(args) = args_res?;
                    listing::tree(server, args).await
                }
                .boxed()
            }))
            .with_route(ToolRoute::new_dyn(Self::read_files_attr(), |mut ctx| {
                let server = ctx.service;
                let args_res = Parameters::<ReadFilesArgs>::from_context_part(&mut ctx);
                async move {
                    let Parameters(args) = args_res?;
                    read::read_files(server, args).await
                }
                .boxed()
            }))
    }

    fn pwd_attr() -> Tool {
        Tool::new(
            Cow::Borrowed("pwd"),
            "Return the absolute path of the workspace root",
            rmcp::handler::server::common::schema_for_type::<PwdArgs>(),
        )
        .with_safety(Safety::READ_ONLY)
    }

    fn ls_attr() -> Tool {
        Tool::new(
            Cow::Borrowed("ls"),
            "List the entries of a workspace directory. Returns a JSON array of names, \
             or a formatted report when show_details is set",
            rmcp::handler::server::common::schema_for_type::<LsArgs>(),
        )
        .with_safety(Safety::READ_ONLY)
    }

    fn glob_attr() -> Tool {
        Tool::new(
            Cow::Borrowed("glob"),
            "Find workspace paths matching a glob pattern such as 'src/**/*.rs'",
            rmcp::handler::server::common::schema_for_type::<GlobArgs>(),
        )
        .with_safety(Safety::READ_ONLY)
    }

    fn find_attr() -> Tool {
        Tool::new(
            Cow::Borrowed("find"),
            "Find files whose contents contain a piece of text",
            rmcp::handler::server::common::schema_for_type::<FindArgs>(),
        )
        .with_safety(Safety::READ_ONLY)
    }

    fn ast_grep_attr() -> Tool {
        Tool::new(
            Cow::Borrowed("ast_grep"),
            "Search source files for a structural code pattern, e.g. 'def $NAME($$$ARGS)'",
            rmcp::handler::server::common::schema_for_type::<AstGrepArgs>(),
        )
        .with_safety(Safety::READ_ONLY)
    }

    fn tree_attr() -> Tool {
        Tool::new(
            Cow::Borrowed("tree"),
            "Render a bounded directory tree of the workspace",
            rmcp::handler::server::common::schema_for_type::<TreeArgs>(),
        )
        .with_safety(Safety::READ_ONLY)
    }

    fn read_files_attr() -> Tool {
        Tool::new(
            Cow::Borrowed("read_files"),
            "Read one or more workspace files, optionally with line numbers and a per-file line limit",
            rmcp::handler::server::common::schema_for_type::<ReadFilesArgs>(),
        )
        .with_safety(Safety::READ_ONLY)
    }

    // テスト用: ハンドラ関数をpublicラッパー経由で公開
    pub async fn pwd(server: &BurrowServer, args: PwdArgs) -> Result<CallToolResult, McpError> {
        listing::pwd(server, args).await
    }

    pub async fn ls(server: &BurrowServer, args: LsArgs) -> Result<CallToolResult, McpError> {
        listing::ls(server, args).await
    }

    pub async fn glob(server: &BurrowServer, args: GlobArgs) -> Result<CallToolResult, McpError> {
        search::glob(server, args).await
    }

    pub async fn find(server: &BurrowServer, args: FindArgs) -> Result<CallToolResult, McpError> {
        search::find(server, args).await
    }

    pub async fn ast_grep(
        server: &BurrowServer,
        args: AstGrepArgs,
    ) -> Result<CallToolResult, McpError> {
        search::ast_grep(server, args).await
    }

    pub async fn tree(server: &BurrowServer, args: TreeArgs) -> Result<CallToolResult, McpError> {
        listing::tree(server, args).await
    }

    pub async fn read_files(
        server: &BurrowServer,
        args: ReadFilesArgs,
    ) -> Result<CallToolResult, McpError> {
        read::read_files(server, args).await
    }
}
