//! Report rendering for the check command.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context as _;
use console::style;
use firedrill_core::prelude::*;

use crate::ui::{colors, format_duration, indicators};
use crate::{CheckArgs, OutputFormat};

/// Writes the drill report to a file or stdout in the requested format.
pub fn write_report(args: &CheckArgs, report: &DrillReport) -> anyhow::Result<()> {
    match &args.output {
        Some(path) => write_to_file(path, args.format, report),
        None => write_to_stdout(args.format, report),
    }
}

fn write_to_file(path: &PathBuf, format: OutputFormat, report: &DrillReport) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create output file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    match format {
        OutputFormat::Text => write_text(report, &mut writer, true),
        OutputFormat::Json => write_json(report, &mut writer),
    }
}

fn write_to_stdout(format: OutputFormat, report: &DrillReport) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();

    match format {
        OutputFormat::Text => write_text(report, &mut stdout, false),
        OutputFormat::Json => write_json(report, &mut stdout),
    }
}

/// Serialises the report as pretty-printed JSON to the given writer.
fn write_json(report: &DrillReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, report)?;
    writeln!(writer)?;
    Ok(())
}

/// Renders the report as styled, human-readable text.
///
/// The captured commit output is always echoed, whatever the verdict, so
/// the tool's diagnostic block and suggested mitigations stay visible.
fn write_text(report: &DrillReport, writer: &mut dyn Write, strip_colors: bool) -> anyhow::Result<()> {
    write_verdict_line(report, writer, strip_colors)?;
    write_commit_summary(report, writer, strip_colors)?;
    write_captured_output(report, writer, strip_colors)?;
    write_failure_hints(report, writer, strip_colors)?;

    if let Some(path) = &report.repo_path {
        write_line(
            writer,
            format_args!(
                "{} {}",
                colors::info().apply_to(indicators::INFO),
                colors::secondary().apply_to(format!("temporary repository kept at {}", path.display()))
            ),
            strip_colors,
        )?;
        writeln!(writer)?;
    }

    Ok(())
}

fn write_verdict_line(report: &DrillReport, writer: &mut dyn Write, strip_colors: bool) -> anyhow::Result<()> {
    let (indicator, headline) = match report.verdict {
        Verdict::Blocked => (
            colors::success().apply_to(indicators::SUCCESS).to_string(),
            "commit blocked by the pre-commit hook",
        ),
        Verdict::CommitSucceeded => (
            colors::error().apply_to(indicators::ERROR).to_string(),
            "commit was not blocked",
        ),
        Verdict::WrongFailure => (
            colors::error().apply_to(indicators::ERROR).to_string(),
            "commit failed, but not because of the scanning hook",
        ),
    };

    write_line(
        writer,
        format_args!("{} {}", indicator, style(headline).bold()),
        strip_colors,
    )
}

fn write_commit_summary(report: &DrillReport, writer: &mut dyn Write, strip_colors: bool) -> anyhow::Result<()> {
    let code = report
        .exit_code
        .map_or_else(|| "killed by signal".to_string(), |c| format!("exit code {c}"));

    write_line(
        writer,
        format_args!(
            "  {} {} {}",
            colors::muted().apply_to(code),
            colors::muted().apply_to("·"),
            colors::muted().apply_to(format_duration(report.elapsed))
        ),
        strip_colors,
    )?;
    writeln!(writer)?;

    Ok(())
}

fn write_captured_output(report: &DrillReport, writer: &mut dyn Write, strip_colors: bool) -> anyhow::Result<()> {
    if report.output.is_empty() {
        write_line(
            writer,
            format_args!("  {}", colors::muted().apply_to("(no commit output captured)")),
            strip_colors,
        )?;
    } else {
        for line in report.output.lines() {
            write_line(
                writer,
                format_args!("  {}", colors::secondary().apply_to(line)),
                strip_colors,
            )?;
        }
    }

    writeln!(writer)?;
    Ok(())
}

fn write_failure_hints(report: &DrillReport, writer: &mut dyn Write, strip_colors: bool) -> anyhow::Result<()> {
    let hints: &[&str] = match report.verdict {
        Verdict::Blocked => &[],
        Verdict::CommitSucceeded => &[
            "No hook intercepted the commit. Check the hook wiring:",
            "  git config --global core.hooksPath   (or init.templateDir)",
        ],
        Verdict::WrongFailure => &[
            "The commit was rejected without the expected diagnostic.",
            "Inspect the output above; the tool may be missing its patterns:",
            "  git secrets --register-aws",
        ],
    };

    if hints.is_empty() {
        return Ok(());
    }

    for hint in hints {
        write_line(
            writer,
            format_args!("  {}", colors::secondary().apply_to(*hint)),
            strip_colors,
        )?;
    }
    writeln!(writer)?;

    Ok(())
}

fn write_line(writer: &mut dyn Write, args: std::fmt::Arguments<'_>, strip_colors: bool) -> anyhow::Result<()> {
    if strip_colors {
        let text = format!("{args}");
        writeln!(writer, "{}", console::strip_ansi_codes(&text))?;
    } else {
        writeln!(writer, "{args}")?;
    }

    Ok(())
}
