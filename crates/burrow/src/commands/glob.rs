use crate::context::Context;
use crate::output::{print_json, print_lines};
use anyhow::Result;
use burrow_core::ops::glob::{self, GlobOptions};
use std::path::PathBuf;

pub struct GlobArgs {
    pub pattern: String,
    pub sort_by: String,
    pub max_results: Option<usize>,
    pub reverse: bool,
    pub json: bool,
}

pub fn run(root: Option<PathBuf>, args: GlobArgs) -> Result<()> {
    let ctx = Context::new(root)?;
    let options = GlobOptions {
        sort_by: args.sort_by.parse()?,
        max_results: args
            .max_results
            .unwrap_or(ctx.config.limits.glob_max_results),
        reverse: args.reverse,
        ..GlobOptions::new(args.pattern)
    };

    let paths = glob::glob(&ctx.workspace, &options)?;
    if args.json {
        print_json(&paths)?;
    } else {
        print_lines(&paths)?;
    }
    Ok(())
}
