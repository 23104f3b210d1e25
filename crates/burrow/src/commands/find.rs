use crate::context::Context;
use crate::output::{print_json, print_lines};
use anyhow::Result;
use burrow_core::config::consts;
use burrow_core::ops::find::{self, FindOptions};
use std::path::PathBuf;

pub struct FindArgs {
    pub search_text: String,
    pub file_pattern: Option<String>,
    pub ignore_case: bool,
    pub word: bool,
    pub max_results: Option<usize>,
    pub sort_by: String,
    pub json: bool,
}

pub fn run(root: Option<PathBuf>, args: FindArgs) -> Result<()> {
    let ctx = Context::new(root)?;
    let options = FindOptions {
        file_pattern: args
            .file_pattern
            .unwrap_or_else(|| consts::find::FILE_PATTERN.to_string()),
        case_sensitive: !args.ignore_case,
        whole_word: args.word,
        max_results: args
            .max_results
            .unwrap_or(ctx.config.limits.find_max_results),
        sort_by: args.sort_by.parse()?,
        ..FindOptions::new(args.search_text)
    };

    let files = find::find(&ctx.workspace, &options)?;
    if args.json {
        print_json(&files)?;
    } else {
        print_lines(&files)?;
    }
    Ok(())
}
