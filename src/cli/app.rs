//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::commands;
use repo_analyzer::output::OutputMode;

/// repo-analyzer - Batch checks across a Bitbucket organization
#[derive(Parser, Debug)]
#[command(
    name = "repo-analyzer",
    version,
    about = "Run checks across every repository of a Bitbucket organization",
    long_about = "Run checks across every repository of a Bitbucket organization.\n\n\
                  Repositories are listed, optionally filtered, shallow-cloned into a\n\
                  local cache and checked concurrently. A summary and every result\n\
                  are written to a timestamped JSON report.\n\n\
                  Credentials are read from BITBUCKET_USERNAME and\n\
                  BITBUCKET_APP_PASSWORD (a .env file is loaded if present)."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a check against the organization's repositories
    Check(CheckArgs),

    /// Count the organization's repositories
    Count {
        /// Bitbucket workspace / organization
        #[arg(long)]
        org: String,
    },

    /// List available checks
    Checks,
}

/// Arguments of `check`
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Check to run (see `repo-analyzer checks`)
    pub name: String,

    /// Bitbucket workspace / organization
    #[arg(long)]
    pub org: String,

    /// Only these repository slugs (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub repos: Option<Vec<String>>,

    /// Only the slugs listed in this file, one per line
    #[arg(long = "reposFile", alias = "repos-file")]
    pub repos_file: Option<PathBuf>,

    /// Search the whole repository tree for manifests
    #[arg(long)]
    pub deep: bool,

    /// Search term for the keyword check
    #[arg(long)]
    pub keyword: Option<String>,

    /// Maximum concurrent checks (default from config, else 5)
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Report directory (default from config, else ./output)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

/// Parse arguments, set up logging and dispatch to a command
pub async fn run() -> anyhow::Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version print to stdout and succeed
            let code = i32::from(err.use_stderr());
            let _ = err.print();
            std::process::exit(code);
        },
    };

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    match cli.command {
        Command::Check(args) => commands::check(args, output_mode).await,
        Command::Count { org } => commands::count(&org, output_mode).await,
        Command::Checks => commands::checks(output_mode),
    }
}
