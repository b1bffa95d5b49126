//! User interface module - console output.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Writing to stdout / stderr

use std::path::Path;

use console::style;

use crate::domain::Version;
use crate::pipeline::{PipelineReport, Step, StepReport};
use crate::process::Invocation;
use crate::warning::PublishWarning;

pub mod formatter;

pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a non-fatal preflight warning.
pub fn display_warning(warning: &PublishWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

pub fn display_version_change(podspec: &Path, previous: &Version, current: &Version) {
    println!(
        "\n{} {}",
        style(podspec.display()).bold(),
        formatter::format_version_change(previous, current)
    );
}

/// Display a step as soon as it has an outcome.
///
/// Failures go to stderr so the tool's diagnostics survive `> /dev/null`.
pub fn display_step(report: &StepReport) {
    let line = formatter::format_step(report);
    if report.outcome.message().is_some() {
        eprintln!("  {}", line);
    } else {
        println!("  {}", line);
        for output in formatter::format_step_output(report) {
            println!("{}", output);
        }
    }
}

pub fn display_preview(steps: &[(Step, Invocation)]) {
    display_status("Dry run, nothing will be executed:");
    for line in formatter::format_preview(steps) {
        println!("{}", line);
    }
}

pub fn display_summary(report: &PipelineReport, tag: &str) {
    let summary = formatter::format_summary(report, tag);
    if report.has_fatal() {
        display_error(&summary);
    } else {
        println!("\n{} {}\n", style("✓").green(), summary);
    }
}
