//! Bounded subprocess execution.
//!
//! Every external command the drill runs goes through [`Runner`], which
//! enforces a hard timeout and caps how much output is captured. A hook that
//! hangs must never hang the drill.

use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use wait_timeout::ChildExt as _;

use crate::error::ExecError;

/// Upper bound on captured output per stream (1 MB).
const MAX_OUTPUT_BYTES: usize = 1024 * 1024;

/// Read limit per stream: one byte past the cap to detect truncation.
const READ_LIMIT: u64 = 1024 * 1024 + 1;

/// Exit code and captured text from a completed subprocess.
///
/// The commit attempt's result is consumed immediately by the verdict step;
/// nothing here is persisted.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Process exit code; `None` if the process was terminated by a signal.
    pub exit_code: Option<i32>,
    /// Combined stdout and stderr text, lossily decoded.
    pub output: String,
    /// Wall-clock time from spawn to exit.
    pub elapsed: Duration,
}

impl CommandResult {
    /// Returns `true` if the process exited with code 0.
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs subprocesses with a hard timeout and bounded output capture.
#[derive(Debug, Clone)]
pub struct Runner {
    timeout: Duration,
}

impl Runner {
    /// Creates a runner that kills any child exceeding `timeout`.
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Runs `program` with `args` in the working directory `cwd`.
    ///
    /// Stdout and stderr are piped, captured after exit, and concatenated,
    /// each truncated at 1 MB. A child that outlives the timeout is killed
    /// and reaped before [`ExecError::TimedOut`] is returned. A non-zero
    /// exit is not an error here; callers inspect the result.
    pub fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<CommandResult, ExecError> {
        let start = Instant::now();

        #[cfg(feature = "tracing")]
        tracing::debug!(program, ?args, cwd = %cwd.display(), "spawning");

        let mut child = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ExecError::Spawn {
                program: program.to_string(),
                source,
            })?;

        let Some(status) = child.wait_timeout(self.timeout).map_err(|source| ExecError::Wait {
            program: program.to_string(),
            source,
        })?
        else {
            // Kill and reap so no zombie outlives the drill.
            let _ = child.kill();
            let _ = child.wait();
            return Err(ExecError::TimedOut {
                program: program.to_string(),
                timeout: self.timeout,
            });
        };

        let mut output = read_bounded(child.stdout.take());
        let stderr = read_bounded(child.stderr.take());

        if !stderr.is_empty() {
            if !output.is_empty() && !output.ends_with('\n') {
                output.push('\n');
            }
            output.push_str(&stderr);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(program, exit_code = ?status.code(), "finished");

        Ok(CommandResult {
            exit_code: status.code(),
            output,
            elapsed: start.elapsed(),
        })
    }
}

/// Drains a child pipe into a string, truncating past the 1 MB cap.
///
/// Works for both `ChildStdout` and `ChildStderr` since the process has
/// already exited by the time this runs.
fn read_bounded<R: Read>(pipe: Option<R>) -> String {
    let Some(pipe) = pipe else {
        return String::new();
    };

    let mut buf = Vec::new();
    let _ = pipe.take(READ_LIMIT).read_to_end(&mut buf);

    let truncated = buf.len() > MAX_OUTPUT_BYTES;
    buf.truncate(MAX_OUTPUT_BYTES);

    let mut text = String::from_utf8_lossy(&buf).into_owned();
    if truncated {
        text.push_str("\n[output truncated at 1 MB]");
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner() -> Runner {
        Runner::new(Duration::from_secs(10))
    }

    #[cfg(unix)]
    #[test]
    fn captures_stdout_and_stderr_combined() {
        let result = runner()
            .run("sh", &["-c", "echo out; echo err >&2"], Path::new("."))
            .unwrap();

        assert!(result.success());
        assert!(result.output.contains("out"));
        assert!(result.output.contains("err"));
    }

    #[cfg(unix)]
    #[test]
    fn reports_nonzero_exit_code() {
        let result = runner().run("sh", &["-c", "exit 3"], Path::new(".")).unwrap();

        assert!(!result.success());
        assert_eq!(result.exit_code, Some(3));
    }

    #[cfg(unix)]
    #[test]
    fn kills_child_on_timeout() {
        let runner = Runner::new(Duration::from_millis(100));
        let err = runner.run("sleep", &["30"], Path::new(".")).unwrap_err();

        assert!(matches!(err, ExecError::TimedOut { .. }));
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let err = runner()
            .run("firedrill-no-such-binary", &[], Path::new("."))
            .unwrap_err();

        assert!(matches!(err, ExecError::Spawn { .. }));
    }
}
