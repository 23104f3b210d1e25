use crate::context::Context;
use crate::output::print_text;
use anyhow::Result;
use std::path::PathBuf;

pub fn run(root: Option<PathBuf>) -> Result<()> {
    let ctx = Context::new(root)?;
    print_text(&ctx.workspace.pwd())?;
    Ok(())
}
