//! Environment preflight checks.
//!
//! Run before the drill so that a missing prerequisite surfaces as an
//! actionable setup error instead of masquerading as a hook failure.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::error::SetupError;
use crate::exec::Runner;

/// Verifies the git CLI is reachable and responding.
pub fn check_git(runner: &Runner) -> Result<(), SetupError> {
    let cwd = std::env::temp_dir();

    let result = runner
        .run("git", &["--version"], &cwd)
        .map_err(|source| SetupError::GitUnavailable { source })?;

    if !result.success() {
        return Err(SetupError::GitCommand {
            args: "--version".to_string(),
            code: result.exit_code,
            output: result.output,
        });
    }

    Ok(())
}

/// Locates `tool` on `PATH`, verifying the file is executable.
///
/// Returns the resolved location, mainly for diagnostics.
pub fn find_tool(tool: &str) -> Result<PathBuf, SetupError> {
    let path_var = std::env::var_os("PATH").unwrap_or_default();
    find_tool_in(tool, &path_var)
}

fn find_tool_in(tool: &str, path_var: &OsStr) -> Result<PathBuf, SetupError> {
    for dir in std::env::split_paths(path_var) {
        let candidate = dir.join(tool);

        if candidate.is_file() {
            if is_executable(&candidate) {
                return Ok(candidate);
            }

            return Err(SetupError::ToolNotExecutable {
                tool: tool.to_string(),
                path: candidate,
            });
        }
    }

    Err(SetupError::ToolMissing { tool: tool.to_string() })
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt as _;

    std::fs::metadata(path).is_ok_and(|m| m.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(_path: &Path) -> bool {
    true
}
