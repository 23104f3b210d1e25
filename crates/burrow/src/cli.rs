//! CLI command structure using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "burrow")]
#[command(version, about = "Read-only workspace inspection tools", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root (defaults to the current directory)
    #[arg(long, global = true, env = "BURROW_ROOT")]
    pub root: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Model Context Protocol server
    #[command(subcommand)]
    Mcp(McpCommands),

    /// Print the absolute workspace root
    Pwd,

    /// List a directory
    Ls {
        /// Directory relative to the workspace root
        #[arg(default_value = ".")]
        path: String,

        /// name, mtime, size or type
        #[arg(long, default_value = "name")]
        sort_by: String,

        /// Include dot entries
        #[arg(short, long)]
        all: bool,

        /// Show kind, size and modification time
        #[arg(short, long)]
        long: bool,

        #[arg(short, long)]
        reverse: bool,

        #[arg(long)]
        json: bool,
    },

    /// Expand a glob pattern
    Glob {
        pattern: String,

        /// name, mtime or size
        #[arg(long, default_value = "name")]
        sort_by: String,

        #[arg(long)]
        max_results: Option<usize>,

        #[arg(short, long)]
        reverse: bool,

        #[arg(long)]
        json: bool,
    },

    /// Find files containing text
    Find {
        search_text: String,

        /// Files to search
        #[arg(long)]
        file_pattern: Option<String>,

        #[arg(short, long)]
        ignore_case: bool,

        #[arg(short, long)]
        word: bool,

        #[arg(long)]
        max_results: Option<usize>,

        /// name or mtime
        #[arg(long, default_value = "name")]
        sort_by: String,

        #[arg(long)]
        json: bool,
    },

    /// Structural code search
    AstGrep {
        pattern: String,

        #[arg(long)]
        file_pattern: Option<String>,

        #[arg(long)]
        language: Option<String>,

        #[arg(long)]
        max_results: Option<usize>,
    },

    /// Print a directory tree
    Tree {
        #[arg(default_value = ".")]
        path: String,

        #[arg(short = 'L', long)]
        max_depth: Option<usize>,

        /// Directories only
        #[arg(short, long)]
        dirs_only: bool,

        #[arg(long)]
        max_entries: Option<usize>,
    },

    /// Print file contents
    Read {
        #[arg(required = true)]
        files: Vec<String>,

        #[arg(short = 'n', long)]
        line_numbers: bool,

        #[arg(long)]
        max_lines: Option<usize>,

        /// Encoding label, e.g. latin1
        #[arg(long)]
        encoding: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum McpCommands {
    /// Serve over stdin/stdout
    Stdio,
}
