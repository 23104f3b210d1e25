//! glob / find / ast_grep

use super::types::{AstGrepArgs, FindArgs, GlobArgs, json_result, parse_sort, text_result};
use crate::handlers::run_blocking;
use crate::server::BurrowServer;
use burrow_core::config::consts;
use burrow_core::ops::ast_grep::{self, AstGrepOptions};
use burrow_core::ops::find::{self, FindOptions, FindSort};
use burrow_core::ops::glob::{self, GlobOptions, GlobSort};
use rmcp::{ErrorData as McpError, model::*};

#[tracing::instrument(skip(server), level = "debug")]
pub(crate) async fn glob(server: &BurrowServer, args: GlobArgs) -> Result<CallToolResult, McpError> {
    let options = GlobOptions {
        sort_by: parse_sort::<GlobSort>(args.sort_by.as_deref())?,
        max_results: args
            .max_results
            .unwrap_or(server.context.config.limits.glob_max_results),
        reverse: args.reverse,
        ..GlobOptions::new(args.pattern)
    };

    let workspace = server.context.workspace.clone();
    let paths = run_blocking(move || glob::glob(&workspace, &options)).await?;
    json_result(&paths)
}

#[tracing::instrument(skip(server), level = "debug")]
pub(crate) async fn find(server: &BurrowServer, args: FindArgs) -> Result<CallToolResult, McpError> {
    let options = FindOptions {
        file_pattern: args
            .file_pattern
            .unwrap_or_else(|| consts::find::FILE_PATTERN.to_string()),
        case_sensitive: args.case_sensitive,
        whole_word: args.whole_word,
        max_results: args
            .max_results
            .unwrap_or(server.context.config.limits.find_max_results),
        sort_by: parse_sort::<FindSort>(args.sort_by.as_deref())?,
        ..FindOptions::new(args.search_text)
    };

    let workspace = server.context.workspace.clone();
    let files = run_blocking(move || find::find(&workspace, &options)).await?;
    json_result(&files)
}

#[tracing::instrument(skip(server), level = "debug")]
pub(crate) async fn ast_grep(
    server: &BurrowServer,
    args: AstGrepArgs,
) -> Result<CallToolResult, McpError> {
    let defaults = &server.context.config.ast_grep;
    let options = AstGrepOptions {
        file_pattern: args
            .file_pattern
            .unwrap_or_else(|| defaults.file_pattern.clone()),
        language: args.language.unwrap_or_else(|| defaults.language.clone()),
        max_results: args
            .max_results
            .unwrap_or(server.context.config.limits.ast_grep_max_results),
        ..AstGrepOptions::new(args.pattern)
    };

    let workspace = server.context.workspace.clone();
    let engine = server.engine.clone();
    let report =
        run_blocking(move || ast_grep::ast_grep(&workspace, engine.as_ref(), &options)).await?;
    Ok(text_result(report.to_string()))
}
