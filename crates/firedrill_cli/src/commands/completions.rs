//! Completions command - generates shell completion scripts.

use clap::CommandFactory as _;
use clap_complete::Shell;

/// Writes a completion script for `shell` to stdout.
pub fn run(shell: Shell) {
    let mut cmd = crate::Cli::command();
    let name = cmd.get_name().to_string();

    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}
