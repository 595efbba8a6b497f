//! Convenience re-exports of the most commonly used types.

pub use crate::config::{Config, ConfigError};
pub use crate::error::{ExecError, SetupError};
pub use crate::exec::{CommandResult, Runner};
pub use crate::harness::{DrillReport, Harness, Verdict};
pub use crate::repo::TempRepo;
