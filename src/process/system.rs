use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::config::ProxyConfig;
use crate::error::{PodPublishError, Result};
use crate::process::{CommandOutput, CommandRunner, Invocation};

/// Spawns real processes in a fixed working directory.
///
/// The environment of each child is the parent's, plus the variables given
/// here. Nothing is exported into the pod-publish process itself.
pub struct SystemRunner {
    work_dir: PathBuf,
    env: Vec<(String, String)>,
}

impl SystemRunner {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        SystemRunner {
            work_dir: work_dir.into(),
            env: Vec::new(),
        }
    }

    /// Add the proxy variables to every spawned process
    pub fn with_proxy(mut self, proxy: &ProxyConfig) -> Self {
        self.env.extend(proxy.env_vars());
        self
    }

    fn command(&self, invocation: &Invocation) -> Command {
        let mut cmd = Command::new(&invocation.program);
        // Output is captured; stdin stays with the terminal
        cmd.args(&invocation.args)
            .current_dir(&self.work_dir)
            .stdin(Stdio::inherit());

        for (key, value) in &self.env {
            cmd.env(key, value);
        }

        cmd
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
        debug!(command = %invocation, dir = %self.work_dir.display(), "spawning");

        let output = self.command(invocation).output().map_err(|e| {
            PodPublishError::command(format!("Failed to execute '{}': {}", invocation, e))
        })?;

        let result = CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        debug!(command = %invocation, code = ?result.code, "finished");
        Ok(result)
    }
}
