use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::{PodPublishError, Result};
use crate::process::{CommandOutput, CommandRunner, Invocation};

/// Scripted response for one command line
#[derive(Debug, Clone)]
pub enum MockResponse {
    Exit(CommandOutput),
    SpawnError(String),
}

impl MockResponse {
    pub fn success(stdout: impl Into<String>) -> Self {
        MockResponse::Exit(CommandOutput {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        })
    }

    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        MockResponse::Exit(CommandOutput {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        })
    }
}

/// Mock runner for testing without spawning git or pod.
///
/// Responses are keyed by the rendered command line; anything unscripted
/// succeeds with empty output. Every invocation is recorded.
#[derive(Default)]
pub struct MockRunner {
    responses: HashMap<String, MockResponse>,
    calls: RefCell<Vec<Invocation>>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the response for a command line such as `"git push origin main"`
    pub fn respond(mut self, command_line: impl Into<String>, response: MockResponse) -> Self {
        self.responses.insert(command_line.into(), response);
        self
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }

    /// Recorded invocations rendered as command lines
    pub fn command_lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.to_string()).collect()
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
        self.calls.borrow_mut().push(invocation.clone());

        match self.responses.get(&invocation.to_string()) {
            Some(MockResponse::Exit(output)) => Ok(output.clone()),
            Some(MockResponse::SpawnError(reason)) => Err(PodPublishError::command(format!(
                "Failed to execute '{}': {}",
                invocation, reason
            ))),
            None => Ok(CommandOutput {
                code: Some(0),
                ..CommandOutput::default()
            }),
        }
    }
}
