use crate::context::Context;
use crate::output::print_text;
use anyhow::Result;
use burrow_core::ops::tree::{self, TreeOptions};
use std::path::PathBuf;

pub struct TreeArgs {
    pub path: String,
    pub max_depth: Option<usize>,
    pub dirs_only: bool,
    pub max_entries: Option<usize>,
}

pub fn run(root: Option<PathBuf>, args: TreeArgs) -> Result<()> {
    let ctx = Context::new(root)?;
    let limits = &ctx.config.limits;
    let options = TreeOptions {
        path: args.path,
        max_depth: args.max_depth.unwrap_or(limits.tree_max_depth),
        include_files: !args.dirs_only,
        max_entries: args.max_entries.unwrap_or(limits.tree_max_entries),
    };

    print_text(&tree::tree(&ctx.workspace, &options)?)?;
    Ok(())
}
