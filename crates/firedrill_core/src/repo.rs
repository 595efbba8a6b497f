//! Temporary git repository lifecycle.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::SetupError;
use crate::exec::Runner;

/// A throwaway git repository rooted in its own temporary directory.
///
/// The directory lives under the system temp root, so it can never coincide
/// with the invoking user's working tree. It is recursively removed when the
/// value drops, which covers every exit path that returns or unwinds.
#[derive(Debug)]
pub struct TempRepo {
    dir: TempDir,
}

impl TempRepo {
    /// Creates a fresh temporary directory and initialises a git repository
    /// inside it.
    ///
    /// Commit signing is disabled and a throwaway committer identity is
    /// configured locally, so the pre-commit hook is the only expected way a
    /// later commit can fail.
    pub fn init(runner: &Runner) -> Result<Self, SetupError> {
        let dir = TempDir::with_prefix("firedrill-").map_err(|source| SetupError::TempDir { source })?;
        let repo = Self { dir };

        repo.git(runner, &["init"])?;
        repo.git(runner, &["config", "commit.gpgsign", "false"])?;
        repo.git(runner, &["config", "user.name", "firedrill"])?;
        repo.git(runner, &["config", "user.email", "firedrill@localhost"])?;

        #[cfg(feature = "tracing")]
        tracing::debug!(path = %repo.path().display(), "temporary repository initialised");

        Ok(repo)
    }

    /// Absolute path of the repository root.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes the seed file containing `line` and returns its path.
    ///
    /// The file is written once and never modified afterwards.
    pub fn seed(&self, filename: &str, line: &str) -> Result<PathBuf, SetupError> {
        let path = self.dir.path().join(filename);

        std::fs::write(&path, format!("{line}\n")).map_err(|source| SetupError::SeedFile {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }

    /// Stages `filename` in the repository index.
    pub fn stage(&self, runner: &Runner, filename: &str) -> Result<(), SetupError> {
        self.git(runner, &["add", "--", filename])
    }

    /// Leaks the temporary directory, returning its path.
    ///
    /// Used by `--keep-temp` so a surprising drill result can be inspected
    /// after the run. The caller owns the cleanup from here.
    #[must_use]
    pub fn keep(self) -> PathBuf {
        self.dir.keep()
    }

    /// Runs a git subcommand inside the repository, mapping a non-zero exit
    /// to a setup error carrying the command's output.
    pub fn git(&self, runner: &Runner, args: &[&str]) -> Result<(), SetupError> {
        let result = runner.run("git", args, self.dir.path())?;

        if !result.success() {
            return Err(SetupError::GitCommand {
                args: args.join(" "),
                code: result.exit_code,
                output: result.output,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn runner() -> Runner {
        Runner::new(Duration::from_secs(30))
    }

    #[test]
    fn init_creates_a_git_repository() {
        let repo = TempRepo::init(&runner()).unwrap();

        assert!(repo.path().join(".git").is_dir());
    }

    #[test]
    fn init_disables_commit_signing_locally() {
        let repo = TempRepo::init(&runner()).unwrap();

        let config = std::fs::read_to_string(repo.path().join(".git/config")).unwrap();
        assert!(config.contains("gpgsign = false"));
    }

    #[test]
    fn seed_writes_the_file_once() {
        let repo = TempRepo::init(&runner()).unwrap();

        let path = repo.seed("drill.txt", "aws_secret_access_key = not-a-key").unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        assert_eq!(content, "aws_secret_access_key = not-a-key\n");
    }

    #[test]
    fn stage_puts_the_seed_file_in_the_index() {
        let runner = runner();
        let repo = TempRepo::init(&runner).unwrap();
        repo.seed("drill.txt", "aws_secret_access_key = not-a-key").unwrap();

        repo.stage(&runner, "drill.txt").unwrap();

        let staged = runner
            .run("git", &["diff", "--cached", "--name-only"], repo.path())
            .unwrap();
        assert!(staged.output.contains("drill.txt"));
    }

    #[test]
    fn drop_removes_the_directory() {
        let repo = TempRepo::init(&runner()).unwrap();
        let path = repo.path().to_path_buf();
        assert!(path.exists());

        drop(repo);

        assert!(!path.exists());
    }

    #[test]
    fn keep_leaks_the_directory() {
        let repo = TempRepo::init(&runner()).unwrap();

        let path = repo.keep();

        assert!(path.exists());
        let _ = std::fs::remove_dir_all(path);
    }
}
