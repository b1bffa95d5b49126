//! Main workflow orchestration logic
//!
//! Keeps the publish workflow separate from CLI argument parsing so it can
//! be driven programmatically, and with a scripted runner in tests.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::{Config, ProxyConfig, PublishConfig};
use crate::domain::Version;
use crate::error::{PodPublishError, Result};
use crate::git::RepoContext;
use crate::pipeline::{self, FailurePolicy, Pipeline, PipelineReport, PublishPlan, Step};
use crate::podspec;
use crate::process::{CommandRunner, Invocation, SystemRunner};
use crate::ui;
use crate::warning::PublishWarning;

/// Arguments for the publish workflow
///
/// Mirrors the CLI Args but in a format suitable for orchestration logic.
/// `None` and `false` fall back to the loaded [Config].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PublishWorkflowArgs {
    /// Explicit podspec path; when absent the single podspec in `dir` is used
    pub podspec: Option<PathBuf>,

    /// Directory searched for the podspec
    pub dir: PathBuf,

    /// Branch pushed after committing the bump
    pub branch: Option<String>,

    /// Private spec repository passed to `pod repo push`
    pub private_repo: Option<String>,

    pub remote: Option<String>,

    /// Per-variable overrides of the configured proxy
    pub proxy: ProxyConfig,

    pub best_effort: bool,

    pub skip_missing_version: bool,

    /// Preview mode - don't write the podspec or run any command
    pub dry_run: bool,
}

impl PublishWorkflowArgs {
    /// Directory whose `podpublish.toml` applies to this run
    pub fn project_dir(&self) -> PathBuf {
        match &self.podspec {
            Some(path) => parent_dir(path),
            None => self.dir.clone(),
        }
    }

    /// Absolute path of the podspec to publish.
    ///
    /// Commands run from the repository root, so relative paths are resolved
    /// here against the invocation directory.
    pub fn resolve_podspec(&self) -> Result<PathBuf> {
        let path = match &self.podspec {
            Some(path) if path.is_file() => path.clone(),
            Some(path) => {
                return Err(PodPublishError::podspec(format!(
                    "Podspec not found: {}",
                    path.display()
                )))
            }
            None => podspec::locate_podspec(&self.dir)?,
        };

        Ok(path.canonicalize()?)
    }

    pub fn failure_policy(&self, config: &Config) -> FailurePolicy {
        if self.best_effort || config.behavior.best_effort {
            FailurePolicy::BestEffort
        } else {
            FailurePolicy::StopOnFatal
        }
    }

    pub fn proxy(&self, config: &Config) -> ProxyConfig {
        ProxyConfig {
            http: self.proxy.http.clone().or_else(|| config.proxy.http.clone()),
            https: self.proxy.https.clone().or_else(|| config.proxy.https.clone()),
            all: self.proxy.all.clone().or_else(|| config.proxy.all.clone()),
        }
    }

    fn publish_settings(&self, config: &Config) -> PublishConfig {
        let mut publish = config.publish.clone();
        if let Some(branch) = &self.branch {
            publish.branch = branch.clone();
        }
        if let Some(repo) = &self.private_repo {
            publish.private_repo = repo.clone();
        }
        if let Some(remote) = &self.remote {
            publish.remote = remote.clone();
        }
        publish
    }
}

/// Result of a finished publish workflow
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowResult {
    /// The podspec was bumped and the pipeline ran
    Published {
        podspec: PathBuf,
        previous: Version,
        version: Version,
        tag: String,
        warnings: Vec<PublishWarning>,
        report: PipelineReport,
    },

    /// Dry run: what would have happened
    Previewed {
        podspec: PathBuf,
        previous: Version,
        version: Version,
        tag: String,
        warnings: Vec<PublishWarning>,
        steps: Vec<(Step, Invocation)>,
    },

    /// No version assignment and skipping was requested; nothing ran
    Skipped { podspec: PathBuf },
}

impl WorkflowResult {
    /// True when a fatal step failure occurred
    pub fn failed(&self) -> bool {
        match self {
            WorkflowResult::Published { report, .. } => report.has_fatal(),
            _ => false,
        }
    }
}

/// Main publish workflow
///
/// 1. Resolve the podspec from the explicit path or directory
/// 2. Discover the git repository holding it (commands run in its work tree)
/// 3. Bump the version, check the repository, run the publish pipeline
///
/// Proxy settings are handed to the spawned processes only.
pub fn run_publish_workflow(args: &PublishWorkflowArgs, config: &Config) -> Result<WorkflowResult> {
    let podspec = args.resolve_podspec()?;

    let repo = match RepoContext::discover(&podspec) {
        Ok(repo) => Some(repo),
        Err(e) => {
            debug!(error = %e, "podspec is not inside a git repository");
            None
        }
    };

    let work_dir = match &repo {
        Some(repo) => repo.work_dir()?,
        None => parent_dir(&podspec),
    };

    let proxy = args.proxy(config);
    if !proxy.is_empty() {
        debug!(?proxy, "proxy settings apply to git and pod");
    }

    let runner = SystemRunner::new(work_dir).with_proxy(&proxy);
    run_with_runner(args, config, &podspec, repo.as_ref(), &runner)
}

/// Run the workflow for an already resolved podspec through `runner`.
pub fn run_with_runner<R: CommandRunner>(
    args: &PublishWorkflowArgs,
    config: &Config,
    podspec: &Path,
    repo: Option<&RepoContext>,
    runner: &R,
) -> Result<WorkflowResult> {
    let bump = if args.dry_run {
        podspec::preview_file(podspec)?
    } else {
        podspec::bump_file(podspec)?
    };

    let Some(bump) = bump else {
        if args.skip_missing_version || config.behavior.skip_missing_version {
            ui::display_status(&format!(
                "No version assignment in {}, nothing to publish",
                podspec.display()
            ));
            return Ok(WorkflowResult::Skipped {
                podspec: podspec.to_path_buf(),
            });
        }
        return Err(PodPublishError::VersionNotFound(podspec.to_path_buf()));
    };

    ui::display_version_change(podspec, &bump.previous, &bump.current);
    if !args.dry_run {
        ui::display_success(&format!(
            "Updated {} to {}",
            podspec.display(),
            bump.literal
        ));
    }

    let publish = args.publish_settings(config);
    let plan = PublishPlan::new(
        &publish,
        &bump.literal,
        podspec,
        publish.branch.clone(),
        publish.private_repo.clone(),
    );

    let warnings = preflight(repo, &plan)?;
    for warning in &warnings {
        ui::display_warning(warning);
    }

    if args.dry_run {
        let steps = pipeline::preview(&plan);
        ui::display_preview(&steps);
        return Ok(WorkflowResult::Previewed {
            podspec: podspec.to_path_buf(),
            previous: bump.previous,
            version: bump.current,
            tag: plan.tag,
            warnings,
            steps,
        });
    }

    let policy = args.failure_policy(config);
    info!(?policy, tag = %plan.tag, "running publish pipeline");
    ui::display_status(&format!("Publishing {}", plan.tag));

    let report = Pipeline::new(runner, policy).run(&plan, ui::display_step);

    Ok(WorkflowResult::Published {
        podspec: podspec.to_path_buf(),
        previous: bump.previous,
        version: bump.current,
        tag: plan.tag,
        warnings,
        report,
    })
}

/// Non-fatal problems worth reporting before anything is pushed
pub fn preflight(repo: Option<&RepoContext>, plan: &PublishPlan) -> Result<Vec<PublishWarning>> {
    let mut warnings = Vec::new();

    let Some(repo) = repo else {
        warnings.push(PublishWarning::NotARepository {
            dir: parent_dir(&plan.podspec),
        });
        return Ok(warnings);
    };

    match repo.current_branch()? {
        Some(current) if current != plan.branch => {
            warnings.push(PublishWarning::BranchMismatch {
                current,
                target: plan.branch.clone(),
            });
        }
        Some(_) => {}
        None => warnings.push(PublishWarning::NoCurrentBranch {
            target: plan.branch.clone(),
        }),
    }

    if repo.tag_exists(&plan.tag)? {
        warnings.push(PublishWarning::TagAlreadyExists {
            tag: plan.tag.clone(),
        });
    }

    if !repo.has_remote(&plan.remote)? {
        warnings.push(PublishWarning::MissingRemote {
            remote: plan.remote.clone(),
        });
    }

    Ok(warnings)
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_dir_prefers_podspec_parent() {
        let args = PublishWorkflowArgs {
            podspec: Some(PathBuf::from("/work/lib/AUCCache.podspec")),
            dir: PathBuf::from("/elsewhere"),
            ..PublishWorkflowArgs::default()
        };
        assert_eq!(args.project_dir(), PathBuf::from("/work/lib"));
    }

    #[test]
    fn test_project_dir_for_bare_file_name() {
        let args = PublishWorkflowArgs {
            podspec: Some(PathBuf::from("AUCCache.podspec")),
            ..PublishWorkflowArgs::default()
        };
        assert_eq!(args.project_dir(), PathBuf::from("."));
    }

    #[test]
    fn test_cli_values_override_config() {
        let args = PublishWorkflowArgs {
            branch: Some("develop".to_string()),
            private_repo: Some("AUCSpecs".to_string()),
            ..PublishWorkflowArgs::default()
        };
        let publish = args.publish_settings(&Config::default());
        assert_eq!(publish.branch, "develop");
        assert_eq!(publish.private_repo, "AUCSpecs");
        assert_eq!(publish.remote, "origin");
    }

    #[test]
    fn test_proxy_merges_per_variable() {
        let mut config = Config::default();
        config.proxy.http = Some("http://config:1".to_string());
        config.proxy.all = Some("socks5://config:2".to_string());

        let args = PublishWorkflowArgs {
            proxy: ProxyConfig {
                http: Some("http://cli:1".to_string()),
                ..ProxyConfig::default()
            },
            ..PublishWorkflowArgs::default()
        };

        let proxy = args.proxy(&config);
        assert_eq!(proxy.http.as_deref(), Some("http://cli:1"));
        assert_eq!(proxy.https, None);
        assert_eq!(proxy.all.as_deref(), Some("socks5://config:2"));
    }

    #[test]
    fn test_failure_policy_sources() {
        let mut config = Config::default();
        let args = PublishWorkflowArgs::default();
        assert_eq!(args.failure_policy(&config), FailurePolicy::StopOnFatal);

        config.behavior.best_effort = true;
        assert_eq!(args.failure_policy(&config), FailurePolicy::BestEffort);

        let args = PublishWorkflowArgs {
            best_effort: true,
            ..PublishWorkflowArgs::default()
        };
        assert_eq!(
            args.failure_policy(&Config::default()),
            FailurePolicy::BestEffort
        );
    }

    #[test]
    fn test_preflight_without_repository() {
        let plan = PublishPlan::new(
            &PublishConfig::default(),
            &Version::new(1, 0, 1),
            "/work/A.podspec",
            "main",
            "Specs",
        );
        let warnings = preflight(None, &plan).unwrap();
        assert_eq!(
            warnings,
            vec![PublishWarning::NotARepository {
                dir: PathBuf::from("/work")
            }]
        );
    }
}
