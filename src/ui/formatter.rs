//! Pure formatting functions - build the text, never print it.

use console::style;

use crate::domain::Version;
use crate::pipeline::{PipelineReport, Step, StepOutcome, StepReport};
use crate::process::Invocation;

/// Single line describing a finished (or skipped) step.
pub fn format_step(report: &StepReport) -> String {
    let label = format!("{:<11}", report.step.name());

    match &report.outcome {
        StepOutcome::Success => format!("{} {} {}", style("✓").green(), label, report.invocation),
        StepOutcome::Warning { message } => {
            format!("{} {} {}", style("⚠").yellow(), label, message)
        }
        StepOutcome::Fatal { message } => {
            format!("{} {} {}", style("✗").red().bold(), label, message)
        }
        StepOutcome::Skipped => format!(
            "{} {} {}",
            style("-").dim(),
            style(label).dim(),
            style("skipped").dim()
        ),
    }
}

/// Indented lines of what a successful step printed.
///
/// Failed steps already carry their diagnostics in the outcome message.
pub fn format_step_output(report: &StepReport) -> Vec<String> {
    if report.outcome != StepOutcome::Success {
        return Vec::new();
    }

    report
        .output
        .lines()
        .map(|line| format!("    {}", style(line).dim()))
        .collect()
}

/// Numbered command lines for a dry run.
pub fn format_preview(steps: &[(Step, Invocation)]) -> Vec<String> {
    steps
        .iter()
        .enumerate()
        .map(|(i, (step, invocation))| {
            format!(
                "  Step {}: {:<11} {}",
                i + 1,
                step.name(),
                style(invocation).cyan()
            )
        })
        .collect()
}

pub fn format_version_change(previous: &Version, current: &Version) -> String {
    format!(
        "{} → {}",
        style(previous.to_string()).red(),
        style(current.to_string()).green()
    )
}

/// One-line summary after the pipeline finished.
pub fn format_summary(report: &PipelineReport, tag: &str) -> String {
    let warnings = report.warnings().len();
    let skipped = report.skipped().len();

    if report.has_fatal() {
        let mut line = format!("Publishing {} failed", tag);
        if skipped > 0 {
            line.push_str(&format!(" ({} step(s) skipped)", skipped));
        }
        line
    } else if warnings > 0 {
        format!("Published {} with {} warning(s)", tag, warnings)
    } else {
        format!("Successfully published {}", tag)
    }
}
