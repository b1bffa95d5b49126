use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pod_publish::cli::{run_publish_workflow, PublishWorkflowArgs, WorkflowResult};
use pod_publish::config::{self, ProxyConfig};
use pod_publish::ui;

#[derive(clap::Parser)]
#[command(
    name = "pod-publish",
    version,
    about = "Bump a podspec patch version, tag it and push it to a private spec repo"
)]
struct Args {
    #[arg(help = "Branch to push after committing the version bump")]
    branch: Option<String>,

    #[arg(help = "Private spec repository for `pod repo push`")]
    repo: Option<String>,

    #[arg(long, help = "Podspec to publish")]
    podspec: Option<PathBuf>,

    #[arg(
        long,
        default_value = ".",
        help = "Directory holding the podspec when --podspec is not given"
    )]
    dir: PathBuf,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, help = "Git remote to push to")]
    remote: Option<String>,

    #[arg(long, help = "Keep running the remaining steps after a failed git step")]
    best_effort: bool,

    #[arg(long, help = "Exit successfully when the podspec has no version assignment")]
    skip_missing_version: bool,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,

    #[arg(long, value_name = "URL", help = "http_proxy for git and pod")]
    http_proxy: Option<String>,

    #[arg(long, value_name = "URL", help = "https_proxy for git and pod")]
    https_proxy: Option<String>,

    #[arg(long, value_name = "URL", help = "all_proxy for git and pod")]
    all_proxy: Option<String>,

    #[arg(short, long, help = "Show debug logging")]
    verbose: bool,
}

impl Args {
    fn into_workflow_args(self) -> PublishWorkflowArgs {
        PublishWorkflowArgs {
            podspec: self.podspec,
            dir: self.dir,
            branch: self.branch,
            private_repo: self.repo,
            remote: self.remote,
            proxy: ProxyConfig {
                http: self.http_proxy,
                https: self.https_proxy,
                all: self.all_proxy,
            },
            best_effort: self.best_effort,
            skip_missing_version: self.skip_missing_version,
            dry_run: self.dry_run,
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pod_publish={}", default_level)));

    // Already initialized is fine
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config_path = args.config.clone();
    let workflow_args = args.into_workflow_args();

    // Load configuration
    let config = match config::load_config(config_path.as_deref(), &workflow_args.project_dir()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let result = match run_publish_workflow(&workflow_args, &config) {
        Ok(result) => result,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    match &result {
        WorkflowResult::Published { tag, report, .. } => {
            ui::display_summary(report, tag);
        }
        WorkflowResult::Previewed { tag, .. } => {
            ui::display_success(&format!("Dry run complete for {}", tag));
        }
        WorkflowResult::Skipped { .. } => {}
    }

    if result.failed() {
        std::process::exit(1);
    }

    Ok(())
}
