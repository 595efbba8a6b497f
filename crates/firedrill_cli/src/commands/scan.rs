//! Scan command - runs the scanning tool directly against a path.
//!
//! Companion to the drill: where `check` exercises the hook wiring, `scan`
//! asks the tool itself to inspect a path and relays its answer verbatim.

use std::time::Duration;

use anyhow::Context as _;
use firedrill_core::prelude::*;
use firedrill_core::preflight;

use crate::ScanArgs;
use crate::ui::exit;

/// Executes the `firedrill scan` command.
///
/// Mirrors the tool's own result: exit 0 when the path is clean, exit 1
/// when prohibited patterns were found.
pub fn run(args: &ScanArgs) -> super::Result {
    let config = super::load_config(args.config.as_deref(), args.tool.as_deref(), args.timeout)?;

    preflight::find_tool(&config.tool).context("scanning tool unavailable")?;

    let runner = Runner::new(Duration::from_secs(config.timeout_secs));
    let cwd = std::env::current_dir().context("cannot determine working directory")?;
    let path = args.path.display().to_string();

    let result = runner
        .run(&config.tool, &["--scan", &path], &cwd)
        .with_context(|| format!("failed to run '{} --scan {path}'", config.tool))?;

    print!("{}", result.output);

    if !result.success() {
        std::process::exit(exit::FAILED);
    }

    Ok(())
}
