//! Check command - runs the pre-commit hook drill.

mod output;

use anyhow::Context as _;
use firedrill_core::prelude::*;

use crate::ui::{colors, exit, print_command_header};
use crate::{CheckArgs, OutputFormat};

/// Executes the `firedrill check` command.
///
/// Exits with code 1 when the drill completes but the hook did not block
/// the commit for the right reason. Setup problems propagate as errors and
/// exit with code 2.
pub fn run(args: &CheckArgs) -> super::Result {
    let config = super::load_config(args.config.as_deref(), args.tool.as_deref(), args.timeout)?;

    #[cfg(feature = "tracing")]
    tracing::debug!(tool = %config.tool, timeout_secs = config.timeout_secs, "drill configured");

    let show_header = should_show_header(args);

    if show_header {
        print_command_header("check");
    }

    if show_header && args.verbose > 0 {
        print_verbose_context(&config);
    }

    let harness = Harness::new(&config).keep_temp(args.keep_temp);
    let report = harness.run().context("drill setup failed")?;

    output::write_report(args, &report)?;

    if !report.verdict.passed() {
        std::process::exit(exit::FAILED);
    }

    Ok(())
}

const fn should_show_header(args: &CheckArgs) -> bool {
    args.output.is_none() && matches!(args.format, OutputFormat::Text)
}

fn print_verbose_context(config: &Config) {
    let rows = [
        ("tool", config.tool.clone()),
        ("timeout", format!("{}s", config.timeout_secs)),
        ("seed file", config.seed_filename.clone()),
        ("marker", config.marker.clone()),
    ];

    for (label, value) in rows {
        println!(
            "  {}  {}",
            colors::muted().apply_to(format!("{label:<9}")),
            colors::secondary().apply_to(value)
        );
    }
    println!();
}
