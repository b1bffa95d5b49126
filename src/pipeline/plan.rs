use std::fmt;
use std::path::PathBuf;

use crate::config::PublishConfig;
use crate::pipeline::Step;
use crate::process::Invocation;

/// Everything the publish steps need to build their command lines
#[derive(Debug, Clone, PartialEq)]
pub struct PublishPlan {
    pub podspec: PathBuf,
    pub branch: String,
    pub remote: String,
    pub private_repo: String,
    pub commit_message: String,
    pub tag: String,
    pub allow_warnings: bool,
}

impl PublishPlan {
    /// Build a plan for `version` (the literal as written to the podspec).
    ///
    /// `branch` and `private_repo` have already been resolved by the caller.
    pub fn new(
        publish: &PublishConfig,
        version: impl fmt::Display,
        podspec: impl Into<PathBuf>,
        branch: impl Into<String>,
        private_repo: impl Into<String>,
    ) -> Self {
        let version = version.to_string();

        PublishPlan {
            podspec: podspec.into(),
            branch: branch.into(),
            remote: publish.remote.clone(),
            private_repo: private_repo.into(),
            commit_message: publish.commit_message_for(&version),
            tag: publish.tag_for(&version),
            allow_warnings: publish.allow_warnings,
        }
    }

    /// Command line for `step`
    pub fn invocation(&self, step: Step) -> Invocation {
        let podspec = self.podspec.to_string_lossy().into_owned();

        let mut invocation = match step {
            Step::Stage => Invocation::new("git", ["add", "."]),
            Step::Commit => {
                Invocation::new("git", ["commit", "-m", self.commit_message.as_str()])
            }
            Step::Tag => Invocation::new("git", ["tag", self.tag.as_str()]),
            Step::PushBranch => Invocation::new(
                "git",
                ["push", self.remote.as_str(), self.branch.as_str()],
            ),
            Step::PushTags => Invocation::new("git", ["push", self.remote.as_str(), "--tags"]),
            Step::Lint => Invocation::new("pod", ["lib", "lint", podspec.as_str()]),
            Step::Publish => Invocation::new(
                "pod",
                ["repo", "push", self.private_repo.as_str(), podspec.as_str()],
            ),
        };

        if self.allow_warnings && matches!(step, Step::Lint | Step::Publish) {
            invocation.args.push("--allow-warnings".to_string());
        }

        invocation
    }
}
