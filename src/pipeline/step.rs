use std::fmt;

use crate::process::Invocation;

/// One stage of the publish sequence, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Stage,
    Commit,
    Tag,
    PushBranch,
    PushTags,
    Lint,
    Publish,
}

impl Step {
    pub const ALL: [Step; 7] = [
        Step::Stage,
        Step::Commit,
        Step::Tag,
        Step::PushBranch,
        Step::PushTags,
        Step::Lint,
        Step::Publish,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Step::Stage => "stage",
            Step::Commit => "commit",
            Step::Tag => "tag",
            Step::PushBranch => "push-branch",
            Step::PushTags => "push-tags",
            Step::Lint => "lint",
            Step::Publish => "publish",
        }
    }

    /// How a failure of this step is classified.
    ///
    /// Git steps are fatal; linting and publishing to the private repo are not.
    pub fn severity(&self) -> Severity {
        match self {
            Step::Lint | Step::Publish => Severity::Warning,
            _ => Severity::Fatal,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Fatal,
}

/// Typed result of a single step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Success,
    /// The step failed but the failure is non-fatal
    Warning { message: String },
    Fatal { message: String },
    /// Not executed because an earlier fatal failure stopped the run
    Skipped,
}

impl StepOutcome {
    pub(crate) fn failed(severity: Severity, message: String) -> Self {
        match severity {
            Severity::Warning => StepOutcome::Warning { message },
            Severity::Fatal => StepOutcome::Fatal { message },
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, StepOutcome::Fatal { .. })
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            StepOutcome::Warning { message } | StepOutcome::Fatal { message } => Some(message),
            StepOutcome::Success | StepOutcome::Skipped => None,
        }
    }
}

/// A step together with the command it ran and what happened
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub step: Step,
    pub invocation: Invocation,
    pub outcome: StepOutcome,
    /// What the command printed; empty when it never ran
    pub output: String,
}
