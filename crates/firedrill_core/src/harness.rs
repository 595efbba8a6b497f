//! The drill driver.
//!
//! A drill is a strictly linear sequence with no retries: preflight, create
//! and seed a temporary repository, attempt a commit, judge the outcome,
//! tear down. For a fixed tool installation and hook wiring the result is
//! deterministic.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::config::Config;
use crate::error::SetupError;
use crate::exec::{CommandResult, Runner};
use crate::repo::TempRepo;
use crate::{keygen, preflight};

/// Outcome of the commit attempt against the pre-commit hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// The commit was rejected and the output carried the expected marker.
    Blocked,
    /// The commit went through; no hook intercepted it.
    CommitSucceeded,
    /// The commit failed, but without the marker, so the rejection came
    /// from something other than the scanning hook.
    WrongFailure,
}

impl Verdict {
    /// Returns `true` when the hook blocked the commit for the right reason.
    #[must_use]
    pub const fn passed(self) -> bool {
        matches!(self, Self::Blocked)
    }
}

/// Structured result of one completed drill.
///
/// The captured commit output is always carried, whatever the verdict, so a
/// human can inspect the tool's diagnostic block and suggested mitigations.
#[derive(Debug, Serialize)]
pub struct DrillReport {
    /// What the commit attempt revealed about the hook.
    pub verdict: Verdict,
    /// Exit code of the commit attempt; `None` if killed by a signal.
    pub exit_code: Option<i32>,
    /// Combined stdout and stderr of the commit attempt.
    pub output: String,
    /// Wall-clock duration of the full drill.
    pub elapsed: Duration,
    /// Location of the temporary repository, present only when it was kept.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_path: Option<PathBuf>,
}

/// Orchestrates one drill from preflight to verdict.
#[derive(Debug)]
pub struct Harness {
    runner: Runner,
    tool: String,
    seed_filename: String,
    commit_message: String,
    marker: String,
    keep_temp: bool,
}

impl Harness {
    /// Builds a harness from resolved configuration.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            runner: Runner::new(Duration::from_secs(config.timeout_secs)),
            tool: config.tool.clone(),
            seed_filename: config.seed_filename.clone(),
            commit_message: config.commit_message.clone(),
            marker: config.marker.clone(),
            keep_temp: false,
        }
    }

    /// Keeps the temporary repository on disk after the drill.
    #[must_use]
    pub fn keep_temp(mut self, keep: bool) -> Self {
        self.keep_temp = keep;
        self
    }

    /// Runs the full drill.
    ///
    /// Returns `Err` only for environment and setup problems; a hook that
    /// fails to block the commit is a completed drill with a failing
    /// [`Verdict`]. The temporary repository is removed on every path out
    /// of this function unless the harness was told to keep it.
    pub fn run(&self) -> Result<DrillReport, SetupError> {
        let start = Instant::now();

        preflight::check_git(&self.runner)?;
        preflight::find_tool(&self.tool)?;

        let repo = TempRepo::init(&self.runner)?;

        let line = format!("aws_secret_access_key = {}", keygen::secret_access_key());
        repo.seed(&self.seed_filename, &line)?;
        repo.stage(&self.runner, &self.seed_filename)?;

        let commit = self.attempt_commit(&repo)?;
        let verdict = self.judge(&commit);

        #[cfg(feature = "tracing")]
        tracing::debug!(?verdict, exit_code = ?commit.exit_code, "drill complete");

        let repo_path = self.keep_temp.then(|| repo.keep());

        Ok(DrillReport {
            verdict,
            exit_code: commit.exit_code,
            output: commit.output,
            elapsed: start.elapsed(),
            repo_path,
        })
    }

    /// Attempts the commit that the pre-commit hook should intercept.
    fn attempt_commit(&self, repo: &TempRepo) -> Result<CommandResult, SetupError> {
        let result = self
            .runner
            .run("git", &["commit", "-m", &self.commit_message], repo.path())?;

        Ok(result)
    }

    /// Applies the conjunction that distinguishes "the hook fired" from any
    /// other commit outcome.
    ///
    /// A rejected commit alone could be an unrelated git failure; the marker
    /// alone could appear in output of a commit that was still accepted.
    /// Only a non-zero exit together with the marker counts as blocked.
    fn judge(&self, commit: &CommandResult) -> Verdict {
        let rejected = !commit.success();
        let marked = commit.output.contains(&self.marker);

        match (rejected, marked) {
            (true, true) => Verdict::Blocked,
            (false, _) => Verdict::CommitSucceeded,
            (true, false) => Verdict::WrongFailure,
        }
    }
}
