use crate::context::Context;
use crate::output::print_text;
use anyhow::Result;
use burrow_core::ops::ast_grep::{self, AstGrepOptions};
use burrow_core::syntax;
use std::path::PathBuf;

pub struct AstGrepArgs {
    pub pattern: String,
    pub file_pattern: Option<String>,
    pub language: Option<String>,
    pub max_results: Option<usize>,
}

pub fn run(root: Option<PathBuf>, args: AstGrepArgs) -> Result<()> {
    let ctx = Context::new(root)?;
    let defaults = &ctx.config.ast_grep;
    let options = AstGrepOptions {
        file_pattern: args
            .file_pattern
            .unwrap_or_else(|| defaults.file_pattern.clone()),
        language: args.language.unwrap_or_else(|| defaults.language.clone()),
        max_results: args
            .max_results
            .unwrap_or(ctx.config.limits.ast_grep_max_results),
        ..AstGrepOptions::new(args.pattern)
    };

    let engine = syntax::default_engine();
    let report = ast_grep::ast_grep(&ctx.workspace, engine.as_ref(), &options)?;
    print_text(&report.to_string())?;
    Ok(())
}
