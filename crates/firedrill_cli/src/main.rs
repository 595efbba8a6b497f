//! # Commands
//!
//! - `firedrill check` - Run the pre-commit hook drill
//! - `firedrill scan` - Run the scanning tool directly against a path
//! - `firedrill completions` - Generate shell completion scripts

mod commands;
mod ui;

use std::path::PathBuf;

use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use clap_complete::Shell;
use console::style;
pub use firedrill_core::CONFIG_FILENAME;

use crate::ui::colors;

const REPO_URL: &str = "https://github.com/spikermint/firedrill";

#[derive(Debug, Parser)]
#[command(
    name = "firedrill",
    version,
    styles = ui::clap_styles(),
    arg_required_else_help = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(visible_alias = "c")]
    Check(CheckArgs),

    #[command(visible_alias = "s")]
    Scan(ScanArgs),

    Completions(CompletionsArgs),
}

/// Output format for drill reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable terminal output.
    #[default]
    Text,
    /// Machine-readable JSON.
    Json,
}

/// Arguments for the `firedrill check` command.
#[derive(Debug, Parser)]
pub struct CheckArgs {
    /// Output format.
    #[arg(short, long, value_enum, default_value_t)]
    pub format: OutputFormat,

    /// Write the report to a file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to `.firedrill.toml` configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Scanning tool binary the hook is expected to invoke.
    #[arg(long, value_name = "NAME")]
    pub tool: Option<String>,

    /// Hard timeout for each subprocess, in seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Keep the temporary repository for inspection instead of deleting it.
    #[arg(long)]
    pub keep_temp: bool,

    /// Increase output verbosity (repeat for more detail).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Arguments for the `firedrill scan` command.
#[derive(Debug, Parser)]
pub struct ScanArgs {
    /// Path for the scanning tool to inspect.
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Scanning tool binary to invoke.
    #[arg(long, value_name = "NAME")]
    pub tool: Option<String>,

    /// Path to `.firedrill.toml` configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Hard timeout for the scan, in seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

/// Arguments for the `firedrill completions` command.
#[derive(Debug, Parser)]
pub struct CompletionsArgs {
    /// Shell to generate completions for.
    #[arg(value_enum)]
    pub shell: Shell,
}

fn main() {
    #[cfg(feature = "tracing")]
    {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(false).without_time())
            .with(EnvFilter::from_default_env())
            .init();
    }

    let cli = parse_cli();

    if let Err(e) = run(cli.command) {
        ui::print_error(&format!("{e:#}"));
        std::process::exit(ui::exit::ERROR);
    }
}

fn parse_cli() -> Cli {
    let cmd = Cli::command().about(build_about()).after_help(build_after_help());

    let matches = cmd.get_matches();

    #[expect(clippy::expect_used, reason = "clap already validated args; this cannot fail")]
    Cli::from_arg_matches(&matches).expect("failed to parse arguments")
}

fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Check(args) => commands::check::run(&args),
        Command::Scan(args) => commands::scan::run(&args),
        Command::Completions(args) => {
            commands::completions::run(args.shell);
            Ok(())
        }
    }
}

fn build_about() -> String {
    format!(
        r"
  {} is a fire drill for your secret-scanning pre-commit hook.

  Creates a throwaway git repository, stages a fabricated AWS key, and
  verifies the hook rejects the commit for the right reason.",
        colors::accent().apply_to("firedrill").bold()
    )
}

fn build_after_help() -> String {
    format!(
        r"
  {}
    firedrill check                Run the drill with defaults
    firedrill check --format json  Emit the report as JSON
    firedrill check --keep-temp    Keep the temp repository for inspection
    firedrill scan src/            Run the scanning tool against a path

  Learn more: {}",
        style("Examples:").bold(),
        colors::accent().apply_to(REPO_URL).underlined()
    )
}
