use crate::context::Context;
use crate::output::{print_json, print_lines, print_text};
use anyhow::Result;
use burrow_core::ops::ls::{self, ListOptions, Listing};
use std::path::PathBuf;

pub struct LsArgs {
    pub path: String,
    pub sort_by: String,
    pub all: bool,
    pub long: bool,
    pub reverse: bool,
    pub json: bool,
}

/// List a directory
///
/// An invalid path prints nothing (or a one-line message with `--long`)
/// and still exits 0.
pub fn run(root: Option<PathBuf>, args: LsArgs) -> Result<()> {
    let ctx = Context::new(root)?;
    let options = ListOptions {
        path: args.path,
        sort_by: args.sort_by.parse()?,
        show_hidden: args.all,
        show_details: args.long,
        reverse: args.reverse,
    };

    match ls::list(&ctx.workspace, &options) {
        Listing::Details(report) => print_text(&report)?,
        Listing::Names(names) if args.json => print_json(&names)?,
        Listing::Names(names) => print_lines(&names)?,
    }
    Ok(())
}
