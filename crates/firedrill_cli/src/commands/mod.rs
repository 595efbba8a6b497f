//! CLI command handlers.

/// The pre-commit hook drill.
pub mod check;
/// Shell completion generation.
pub mod completions;
/// Direct scanning-tool invocation.
pub mod scan;

use std::path::Path;

use firedrill_core::prelude::*;

use crate::CONFIG_FILENAME;

/// Convenience alias for command return types.
pub type Result<T = ()> = anyhow::Result<T>;

/// Loads `.firedrill.toml` (or the default config) and applies CLI
/// overrides for the tool name and timeout.
fn load_config(
    config_path: Option<&Path>,
    tool: Option<&str>,
    timeout: Option<u64>,
) -> anyhow::Result<Config> {
    let path = config_path.unwrap_or(Path::new(CONFIG_FILENAME));
    let mut config = Config::load(path)?;

    if let Some(tool) = tool {
        config.tool = tool.to_string();
    }
    if let Some(timeout) = timeout {
        config.timeout_secs = timeout;
    }

    Ok(config)
}
