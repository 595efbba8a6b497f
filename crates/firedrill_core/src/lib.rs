//! Core drill engine for firedrill.
//!
//! Validates that a secret-scanning tool wired into git's pre-commit hook
//! path actually blocks commits containing prohibited patterns. The crate
//! creates a throwaway git repository, stages a fabricated AWS credential,
//! attempts a real `git commit`, and judges the outcome.
//!
//! # Main Types
//!
//! - [`Harness`] - Runs the drill end to end and produces a report
//! - [`TempRepo`] - Throwaway git repository with guaranteed teardown
//! - [`Runner`] - Subprocess execution with a hard timeout
//! - [`Config`] - User configuration loaded from `.firedrill.toml`
//!
//! # Error Handling
//!
//! This crate uses [`thiserror`] for structured, typed errors that callers
//! can match on:
//!
//! - [`SetupError`] - Environment and setup failures (misconfiguration)
//! - [`ExecError`] - Subprocess spawn, wait, and timeout failures
//! - [`ConfigError`] - Configuration loading/parsing failures
//!
//! A failed drill is not an error: [`Harness::run`] returns a report whose
//! [`Verdict`] records whether the hook blocked the commit. The CLI crate
//! (`firedrill_cli`) uses `anyhow` for error propagation.

/// Drill configuration loaded from `.firedrill.toml`.
pub mod config;
/// Error types separating environment failures from drill failures.
pub mod error;
/// Bounded subprocess execution.
pub mod exec;
/// The drill driver and its report types.
pub mod harness;
/// Fabricated AWS-style key material.
pub mod keygen;
/// Environment preflight checks.
pub mod preflight;
/// Common re-exports for internal use.
pub mod prelude;
/// Temporary git repository lifecycle.
pub mod repo;

pub use config::{Config, ConfigError};
pub use error::{ExecError, SetupError};
pub use exec::{CommandResult, Runner};
pub use harness::{DrillReport, Harness, Verdict};
pub use repo::TempRepo;

/// Default filename for firedrill configuration.
pub const CONFIG_FILENAME: &str = ".firedrill.toml";

/// Diagnostic substring git-secrets emits when it matches a prohibited
/// pattern. The drill treats its presence in the commit output, together
/// with a non-zero exit, as proof the scanning hook fired.
pub const PROHIBITED_MARKER: &str = "[ERROR] Matched one or more prohibited patterns";
