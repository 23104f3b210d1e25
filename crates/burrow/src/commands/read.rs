use crate::context::Context;
use anyhow::Result;
use burrow_core::ops::read::{self, ReadOptions};
use std::io::{self, Write};
use std::path::PathBuf;

pub struct ReadArgs {
    pub files: Vec<String>,
    pub line_numbers: bool,
    pub max_lines: Option<usize>,
    pub encoding: Option<String>,
}

/// Print file contents exactly as the `read_files` tool returns them
pub fn run(root: Option<PathBuf>, args: ReadArgs) -> Result<()> {
    let ctx = Context::new(root)?;
    let options = ReadOptions {
        include_line_numbers: args.line_numbers,
        max_lines_per_file: args.max_lines,
        encoding: args
            .encoding
            .unwrap_or_else(|| ctx.config.read.encoding.clone()),
        ..ReadOptions::new(args.files)
    };

    let content = read::read_files(&ctx.workspace, &options)?;
    let mut out = io::stdout().lock();
    out.write_all(content.as_bytes())?;
    out.flush()?;
    Ok(())
}
