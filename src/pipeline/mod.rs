//! Publish pipeline
//!
//! The release is an ordered list of [Step]s: stage, commit, tag, push the
//! branch, push tags, lint, publish to the private spec repo. Each executed
//! step yields a typed [StepOutcome]; the [FailurePolicy] chosen by the
//! caller decides whether a fatal outcome stops the remaining steps.

pub mod plan;
pub mod step;

pub use plan::PublishPlan;
pub use step::{Severity, Step, StepOutcome, StepReport};

use tracing::{info, warn};

use crate::process::{CommandRunner, Invocation};

/// What to do after a fatal step failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Mark every remaining step as skipped
    #[default]
    StopOnFatal,
    /// Run every step regardless of earlier failures
    BestEffort,
}

/// Outcome of a whole pipeline run, one entry per step
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PipelineReport {
    pub steps: Vec<StepReport>,
}

impl PipelineReport {
    pub fn has_fatal(&self) -> bool {
        self.steps.iter().any(|s| s.outcome.is_fatal())
    }

    /// Steps that failed non-fatally
    pub fn warnings(&self) -> Vec<&StepReport> {
        self.steps
            .iter()
            .filter(|s| matches!(s.outcome, StepOutcome::Warning { .. }))
            .collect()
    }

    pub fn skipped(&self) -> Vec<Step> {
        self.steps
            .iter()
            .filter(|s| s.outcome == StepOutcome::Skipped)
            .map(|s| s.step)
            .collect()
    }

    /// True when every step ran and succeeded
    pub fn succeeded(&self) -> bool {
        self.steps.iter().all(|s| s.outcome == StepOutcome::Success)
    }

    pub fn outcome_of(&self, step: Step) -> Option<&StepOutcome> {
        self.steps
            .iter()
            .find(|s| s.step == step)
            .map(|s| &s.outcome)
    }
}

/// Command lines the plan would run, without running them
pub fn preview(plan: &PublishPlan) -> Vec<(Step, Invocation)> {
    Step::ALL
        .iter()
        .map(|step| (*step, plan.invocation(*step)))
        .collect()
}

/// Executes a [PublishPlan] through a [CommandRunner]
pub struct Pipeline<'a, R: CommandRunner> {
    runner: &'a R,
    policy: FailurePolicy,
}

impl<'a, R: CommandRunner> Pipeline<'a, R> {
    pub fn new(runner: &'a R, policy: FailurePolicy) -> Self {
        Pipeline { runner, policy }
    }

    /// Run every step in order.
    ///
    /// `on_step` is called as soon as each step has an outcome, skipped
    /// steps included.
    pub fn run<F>(&self, plan: &PublishPlan, mut on_step: F) -> PipelineReport
    where
        F: FnMut(&StepReport),
    {
        let mut report = PipelineReport::default();
        let mut stopped = false;

        for step in Step::ALL {
            let invocation = plan.invocation(step);

            let (outcome, output) = if stopped {
                (StepOutcome::Skipped, String::new())
            } else {
                self.execute(step, &invocation)
            };

            if outcome.is_fatal() && self.policy == FailurePolicy::StopOnFatal {
                stopped = true;
            }

            let step_report = StepReport {
                step,
                invocation,
                outcome,
                output,
            };
            on_step(&step_report);
            report.steps.push(step_report);
        }

        report
    }

    fn execute(&self, step: Step, invocation: &Invocation) -> (StepOutcome, String) {
        info!(%step, command = %invocation, "running step");

        let (message, transcript) = match self.runner.run(invocation) {
            Ok(output) if output.success() => {
                let transcript = output.transcript();
                if !transcript.is_empty() {
                    info!(%step, output = %transcript, "step output");
                }
                return (StepOutcome::Success, transcript);
            }
            Ok(output) => {
                let code = output
                    .code
                    .map_or_else(|| "signal".to_string(), |c| c.to_string());
                let diagnostics = output.diagnostics();
                let message = if diagnostics.is_empty() {
                    format!("'{}' exited with {}", invocation, code)
                } else {
                    format!("'{}' exited with {}: {}", invocation, code, diagnostics)
                };
                (message, output.transcript())
            }
            Err(e) => (e.to_string(), String::new()),
        };

        warn!(%step, %message, "step failed");
        (StepOutcome::failed(step.severity(), message), transcript)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PublishConfig;
    use crate::domain::Version;
    use crate::process::mock::{MockResponse, MockRunner};

    fn plan() -> PublishPlan {
        PublishPlan::new(
            &PublishConfig::default(),
            &Version::new(1, 2, 4),
            "A.podspec",
            "main",
            "Specs",
        )
    }

    #[test]
    fn test_all_steps_succeed() {
        let runner = MockRunner::new();
        let report = Pipeline::new(&runner, FailurePolicy::StopOnFatal).run(&plan(), |_| {});

        assert!(report.succeeded());
        assert!(!report.has_fatal());
        assert_eq!(runner.calls().len(), 7);
        assert_eq!(runner.command_lines()[0], "git add .");
        assert_eq!(
            runner.command_lines()[6],
            "pod repo push Specs A.podspec --allow-warnings"
        );
    }

    #[test]
    fn test_stop_on_fatal_skips_rest() {
        let runner = MockRunner::new().respond(
            "git push origin main",
            MockResponse::failure(1, "rejected"),
        );
        let report = Pipeline::new(&runner, FailurePolicy::StopOnFatal).run(&plan(), |_| {});

        assert!(report.has_fatal());
        assert_eq!(runner.calls().len(), 4);
        assert_eq!(
            report.skipped(),
            vec![Step::PushTags, Step::Lint, Step::Publish]
        );
        let message = report.outcome_of(Step::PushBranch).unwrap().message().unwrap();
        assert!(message.contains("exited with 1: rejected"));
    }

    #[test]
    fn test_best_effort_runs_everything() {
        let runner = MockRunner::new().respond(
            "git commit -m \"Bump version to 1.2.4\"",
            MockResponse::failure(1, "nothing to commit"),
        );
        let report = Pipeline::new(&runner, FailurePolicy::BestEffort).run(&plan(), |_| {});

        assert!(report.has_fatal());
        assert!(report.skipped().is_empty());
        assert_eq!(runner.calls().len(), 7);
        assert_eq!(report.outcome_of(Step::Tag), Some(&StepOutcome::Success));
    }

    #[test]
    fn test_lint_failure_is_warning() {
        let runner = MockRunner::new().respond(
            "pod lib lint A.podspec --allow-warnings",
            MockResponse::failure(1, "[!] AUCCache did not pass validation"),
        );
        let report = Pipeline::new(&runner, FailurePolicy::StopOnFatal).run(&plan(), |_| {});

        assert!(!report.has_fatal());
        assert!(!report.succeeded());
        assert_eq!(report.warnings().len(), 1);
        assert_eq!(report.warnings()[0].step, Step::Lint);
        assert_eq!(report.outcome_of(Step::Publish), Some(&StepOutcome::Success));
    }

    #[test]
    fn test_spawn_failure_uses_step_severity() {
        let runner = MockRunner::new()
            .respond(
                "pod repo push Specs A.podspec --allow-warnings",
                MockResponse::SpawnError("No such file or directory".to_string()),
            )
            .respond(
                "git add .",
                MockResponse::SpawnError("No such file or directory".to_string()),
            );

        let report = Pipeline::new(&runner, FailurePolicy::BestEffort).run(&plan(), |_| {});
        assert!(report.outcome_of(Step::Stage).unwrap().is_fatal());
        assert!(matches!(
            report.outcome_of(Step::Publish),
            Some(StepOutcome::Warning { .. })
        ));
    }

    #[test]
    fn test_failure_without_output() {
        let runner = MockRunner::new().respond("git tag 1.2.4", MockResponse::failure(128, ""));
        let report = Pipeline::new(&runner, FailurePolicy::StopOnFatal).run(&plan(), |_| {});

        assert_eq!(
            report.outcome_of(Step::Tag).unwrap().message(),
            Some("'git tag 1.2.4' exited with 128")
        );
    }

    #[test]
    fn test_success_output_is_reported() {
        let runner = MockRunner::new().respond(
            "pod lib lint A.podspec --allow-warnings",
            MockResponse::success(" -> AUCCache (1.2.4)\n    - WARN  | summary: too short\n"),
        );
        let mut printed = Vec::new();
        let report = Pipeline::new(&runner, FailurePolicy::StopOnFatal)
            .run(&plan(), |r| printed.push(r.output.clone()));

        let lint = &report.steps[5];
        assert_eq!(lint.step, Step::Lint);
        assert_eq!(lint.outcome, StepOutcome::Success);
        assert_eq!(
            lint.output,
            "-> AUCCache (1.2.4)\n    - WARN  | summary: too short"
        );
        assert_eq!(printed[5], lint.output);
        assert_eq!(report.steps[0].output, "");
    }

    #[test]
    fn test_skipped_steps_have_no_output() {
        let runner = MockRunner::new().respond("git add .", MockResponse::failure(1, "x"));
        let report = Pipeline::new(&runner, FailurePolicy::StopOnFatal).run(&plan(), |_| {});

        assert_eq!(report.steps[0].output, "x");
        assert!(report.steps[1..].iter().all(|s| s.output.is_empty()));
    }

    #[test]
    fn test_on_step_sees_every_step() {
        let runner = MockRunner::new().respond("git add .", MockResponse::failure(1, "x"));
        let mut seen = Vec::new();
        Pipeline::new(&runner, FailurePolicy::StopOnFatal).run(&plan(), |r| seen.push(r.step));

        assert_eq!(seen, Step::ALL.to_vec());
    }

    #[test]
    fn test_preview_does_not_run() {
        let preview = preview(&plan());
        assert_eq!(preview.len(), 7);
        assert_eq!(preview[2].0, Step::Tag);
        assert_eq!(preview[2].1.to_string(), "git tag 1.2.4");
    }
}
