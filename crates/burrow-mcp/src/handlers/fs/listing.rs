//! pwd / ls / tree

use super::types::{LsArgs, PwdArgs, TreeArgs, json_result, parse_sort, text_result};
use crate::handlers::run_blocking;
use crate::server::BurrowServer;
use burrow_core::ops::ls::{self, ListOptions, ListSort, Listing};
use burrow_core::ops::tree::{self, TreeOptions};
use rmcp::{ErrorData as McpError, model::*};

pub(crate) async fn pwd(server: &BurrowServer, _args: PwdArgs) -> Result<CallToolResult, McpError> {
    Ok(text_result(server.context.workspace.pwd()))
}

#[tracing::instrument(skip(server), level = "debug")]
pub(crate) async fn ls(server: &BurrowServer, args: LsArgs) -> Result<CallToolResult, McpError> {
    let options = ListOptions {
        path: args.path.unwrap_or_else(|| ".".to_string()),
        sort_by: parse_sort::<ListSort>(args.sort_by.as_deref())?,
        show_hidden: args.show_hidden,
        show_details: args.show_details,
        reverse: args.reverse,
    };

    let workspace = server.context.workspace.clone();
    match run_blocking(move || Ok(ls::list(&workspace, &options))).await? {
        Listing::Names(names) => json_result(&names),
        Listing::Details(report) => Ok(text_result(report)),
    }
}

#[tracing::instrument(skip(server), level = "debug")]
pub(crate) async fn tree(server: &BurrowServer, args: TreeArgs) -> Result<CallToolResult, McpError> {
    let limits = &server.context.config.limits;
    let options = TreeOptions {
        path: args.path.unwrap_or_else(|| ".".to_string()),
        max_depth: args.max_depth.unwrap_or(limits.tree_max_depth),
        include_files: args.include_files,
        max_entries: args.max_entries.unwrap_or(limits.tree_max_entries),
    };

    let workspace = server.context.workspace.clone();
    let rendered = run_blocking(move || tree::tree(&workspace, &options)).await?;
    Ok(text_result(rendered))
}
