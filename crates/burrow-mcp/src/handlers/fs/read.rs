//! read_files

use super::types::{ReadFilesArgs, text_result};
use crate::handlers::run_blocking;
use crate::server::BurrowServer;
use burrow_core::ops::read::{self, ReadOptions};
use rmcp::{ErrorData as McpError, model::*};

#[tracing::instrument(skip(server), level = "debug")]
pub(crate) async fn read_files(
    server: &BurrowServer,
    args: ReadFilesArgs,
) -> Result<CallToolResult, McpError> {
    let options = ReadOptions {
        include_line_numbers: args.include_line_numbers,
        max_lines_per_file: args.max_lines_per_file,
        encoding: args
            .encoding
            .unwrap_or_else(|| server.context.config.read.encoding.clone()),
        ..ReadOptions::new(args.files)
    };

    let workspace = server.context.workspace.clone();
    let content = run_blocking(move || read::read_files(&workspace, &options)).await?;
    Ok(text_result(content))
}
