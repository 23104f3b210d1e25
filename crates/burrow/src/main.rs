mod cli;
mod commands;
mod context;
mod output;

use clap::Parser;
use cli::{Cli, Commands, McpCommands};
use tracing_subscriber::{EnvFilter, fmt};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let root = cli.root;
    let result = match cli.command {
        Commands::Mcp(mcp_cmd) => match mcp_cmd {
            McpCommands::Stdio => commands::mcp::run_stdio(root),
        },
        Commands::Pwd => commands::pwd::run(root),
        Commands::Ls {
            path,
            sort_by,
            all,
            long,
            reverse,
            json,
        } => commands::ls::run(
            root,
            commands::ls::LsArgs {
                path,
                sort_by,
                all,
                long,
                reverse,
                json,
            },
        ),
        Commands::Glob {
            pattern,
            sort_by,
            max_results,
            reverse,
            json,
        } => commands::glob::run(
            root,
            commands::glob::GlobArgs {
                pattern,
                sort_by,
                max_results,
                reverse,
                json,
            },
        ),
        Commands::Find {
            search_text,
            file_pattern,
            ignore_case,
            word,
            max_results,
            sort_by,
            json,
        } => commands::find::run(
            root,
            commands::find::FindArgs {
                search_text,
                file_pattern,
                ignore_case,
                word,
                max_results,
                sort_by,
                json,
            },
        ),
        Commands::AstGrep {
            pattern,
            file_pattern,
            language,
            max_results,
        } => commands::ast_grep::run(
            root,
            commands::ast_grep::AstGrepArgs {
                pattern,
                file_pattern,
                language,
                max_results,
            },
        ),
        Commands::Tree {
            path,
            max_depth,
            dirs_only,
            max_entries,
        } => commands::tree::run(
            root,
            commands::tree::TreeArgs {
                path,
                max_depth,
                dirs_only,
                max_entries,
            },
        ),
        Commands::Read {
            files,
            line_numbers,
            max_lines,
            encoding,
        } => commands::read::run(
            root,
            commands::read::ReadArgs {
                files,
                line_numbers,
                max_lines,
                encoding,
            },
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr; stdout carries command output and the MCP protocol
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
