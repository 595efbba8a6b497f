//! End-to-end tests for the `firedrill check` command.
//!
//! Each test builds a scratch environment: a throwaway `HOME` with a global
//! git config (via `GIT_CONFIG_GLOBAL`) whose `core.hooksPath` points at a
//! fake pre-commit hook, and a fake `git-secrets` on `PATH`. No real
//! git-secrets installation is needed.

#![cfg(unix)]
#![expect(clippy::expect_used, reason = "tests use expect for clearer failure messages")]

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const MARKER: &str = "[ERROR] Matched one or more prohibited patterns";

const BLOCKING_HOOK: &str = r#"#!/bin/sh
echo "drill.txt:1:aws_secret_access_key = <redacted>"
echo "[ERROR] Matched one or more prohibited patterns"
echo ""
echo "Possible mitigations:"
echo "- Mark false positives as allowed using: git config --add secrets.allowed ..."
exit 1
"#;

const SILENT_HOOK: &str = "#!/bin/sh\nexit 0\n";

const UNRELATED_FAILURE_HOOK: &str = "#!/bin/sh\necho 'pre-commit: linting failed'\nexit 1\n";

struct DrillEnv {
    home: TempDir,
}

impl DrillEnv {
    /// Environment whose every `git commit` runs the given hook script.
    fn with_hook(hook_script: &str) -> Self {
        let env = Self::bare();

        let hooks = env.home.path().join("hooks");
        fs::create_dir_all(&hooks).expect("create hooks dir");
        write_executable(&hooks.join("pre-commit"), hook_script);

        let gitconfig = format!("[core]\n\thooksPath = {}\n", hooks.display());
        fs::write(env.home.path().join("gitconfig"), gitconfig).expect("write gitconfig");

        env
    }

    /// Environment with the fake tool on `PATH` but no hook wiring at all.
    fn without_hook() -> Self {
        let env = Self::bare();
        fs::write(env.home.path().join("gitconfig"), "").expect("write gitconfig");
        env
    }

    fn bare() -> Self {
        let home = TempDir::new().expect("create temp home");

        let bin = home.path().join("bin");
        fs::create_dir_all(&bin).expect("create bin dir");
        write_executable(&bin.join("git-secrets"), "#!/bin/sh\nexit 0\n");

        Self { home }
    }

    fn remove_fake_tool(&self) {
        fs::remove_file(self.home.path().join("bin/git-secrets")).expect("remove fake tool");
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_firedrill"));

        let bin = self.home.path().join("bin");
        let path = std::env::var("PATH").unwrap_or_default();

        cmd.env("HOME", self.home.path())
            .env("GIT_CONFIG_GLOBAL", self.home.path().join("gitconfig"))
            .env("GIT_CONFIG_NOSYSTEM", "1")
            .env("PATH", format!("{}:{path}", bin.display()));

        cmd
    }
}

fn write_executable(path: &Path, content: &str) {
    use std::os::unix::fs::PermissionsExt;

    fs::write(path, content).expect("write script");
    let mut perms = fs::metadata(path).expect("stat script").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).expect("chmod script");
}

#[test]
fn blocking_hook_passes_the_drill() {
    let env = DrillEnv::with_hook(BLOCKING_HOOK);

    env.command()
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("commit blocked by the pre-commit hook"))
        .stdout(predicate::str::contains(MARKER));
}

#[test]
fn report_echoes_the_tools_mitigations() {
    let env = DrillEnv::with_hook(BLOCKING_HOOK);

    env.command()
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Possible mitigations:"));
}

#[test]
fn missing_hook_fails_the_drill() {
    let env = DrillEnv::without_hook();

    env.command()
        .arg("check")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("commit was not blocked"));
}

#[test]
fn silent_hook_counts_as_not_blocked() {
    let env = DrillEnv::with_hook(SILENT_HOOK);

    env.command().arg("check").assert().failure().code(1);
}

#[test]
fn unrelated_hook_failure_is_reported_distinctly() {
    let env = DrillEnv::with_hook(UNRELATED_FAILURE_HOOK);

    env.command()
        .arg("check")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("not because of the scanning hook"))
        .stdout(predicate::str::contains("pre-commit: linting failed"));
}

#[test]
fn json_report_carries_the_verdict() {
    let env = DrillEnv::with_hook(BLOCKING_HOOK);

    env.command()
        .args(["check", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"verdict\": \"blocked\""))
        .stdout(predicate::str::contains("\"exit_code\": 1"));
}

#[test]
fn json_report_for_a_failed_drill() {
    let env = DrillEnv::without_hook();

    env.command()
        .args(["check", "--format", "json"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("\"verdict\": \"commit_succeeded\""));
}

#[test]
fn report_can_be_written_to_a_file() {
    let env = DrillEnv::with_hook(BLOCKING_HOOK);
    let report_path = env.home.path().join("report.json");

    env.command()
        .args(["check", "--format", "json", "--output"])
        .arg(&report_path)
        .assert()
        .success();

    let report = fs::read_to_string(&report_path).expect("read report file");
    assert!(report.contains("\"verdict\": \"blocked\""));
}

#[test]
fn missing_tool_is_a_setup_error() {
    let env = DrillEnv::with_hook(BLOCKING_HOOK);
    env.remove_fake_tool();

    env.command()
        .arg("check")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("was not found on PATH"));
}

#[test]
fn tool_flag_overrides_the_default() {
    let env = DrillEnv::with_hook(BLOCKING_HOOK);
    env.remove_fake_tool();

    // git itself stands in as the "tool"; only the PATH lookup matters here.
    env.command()
        .args(["check", "--tool", "git"])
        .assert()
        .success();
}

#[test]
fn verbose_flag_prints_the_resolved_configuration() {
    let env = DrillEnv::with_hook(BLOCKING_HOOK);

    env.command()
        .args(["check", "-v"])
        .assert()
        .success()
        .stdout(predicate::str::contains("git-secrets"))
        .stdout(predicate::str::contains("timeout"));
}

#[test]
fn config_file_overrides_are_honoured() {
    let env = DrillEnv::with_hook(UNRELATED_FAILURE_HOOK);
    let config_path = env.home.path().join(".firedrill.toml");
    fs::write(&config_path, "marker = \"linting failed\"\n").expect("write config");

    // With the custom marker, the "unrelated" failure is the expected one.
    env.command()
        .args(["check", "--config"])
        .arg(&config_path)
        .assert()
        .success();
}
