use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Errors from spawning or supervising a subprocess.
#[derive(Debug, Error)]
pub enum ExecError {
    /// The program could not be started at all.
    #[error("failed to run '{program}': {source}")]
    Spawn {
        /// Name of the program that failed to start.
        program: String,
        /// The underlying I/O error (typically not-found or permission denied).
        #[source]
        source: std::io::Error,
    },

    /// Waiting on the child process failed.
    #[error("failed waiting for '{program}': {source}")]
    Wait {
        /// Name of the program being waited on.
        program: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The child outlived the timeout and was killed.
    #[error("'{program}' timed out after {timeout:?} and was killed")]
    TimedOut {
        /// Name of the program that was killed.
        program: String,
        /// The timeout that expired.
        timeout: Duration,
    },
}

/// Environment and setup failures, distinct from a failed drill.
///
/// These indicate the machine is misconfigured: a prerequisite is missing or
/// the temporary repository could not be prepared. They must never be
/// confused with a hook that failed to block the commit, which is an ordinary
/// drill result carried in the report.
#[derive(Debug, Error)]
pub enum SetupError {
    /// The temporary directory could not be created.
    #[error("failed to create temporary directory: {source}")]
    TempDir {
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The seed file could not be written.
    #[error("failed to write seed file '{path}': {source}")]
    SeedFile {
        /// Path of the seed file that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The git CLI could not be reached at all.
    #[error("git is not usable: {source}")]
    GitUnavailable {
        /// The spawn or timeout failure from invoking `git --version`.
        #[source]
        source: ExecError,
    },

    /// A git command run during setup exited non-zero.
    #[error("'git {args}' exited with {code:?}:\n{output}")]
    GitCommand {
        /// The git subcommand and arguments that failed.
        args: String,
        /// Exit code of the failed command; `None` if killed by a signal.
        code: Option<i32>,
        /// Combined output of the failed command.
        output: String,
    },

    /// The scanning tool is not on `PATH`.
    #[error("'{tool}' was not found on PATH")]
    ToolMissing {
        /// Name of the scanning tool binary.
        tool: String,
    },

    /// The scanning tool was found but is not executable.
    #[error("'{tool}' at '{path}' is not executable")]
    ToolNotExecutable {
        /// Name of the scanning tool binary.
        tool: String,
        /// Location where the non-executable file was found.
        path: PathBuf,
    },

    /// Subprocess plumbing failed or timed out during the drill.
    #[error(transparent)]
    Exec(#[from] ExecError),
}
