//! External process runner for the gemini CLI
//!
//! One invocation per tool call, no retries. The wall-clock timeout
//! forcibly terminates the child so nothing is left running.

use std::process::Stdio;
use std::time::Duration;

use thiserror::Error;
use tokio::process::Command;
use tokio::time::timeout;

/// Captured output of a finished invocation
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Failure to produce a `RunOutput`
#[derive(Debug, Error)]
pub enum RunError {
    #[error("timed out after {0:?}")]
    TimedOut(Duration),

    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        source: std::io::Error,
    },

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Runs an invocation prompt through an external program
pub trait PromptRunner: Send + Sync {
    fn run(&self, prompt: &str) -> Result<RunOutput, RunError>;
}

/// Runner shelling out to the gemini CLI as `<program> -p <prompt>`
pub struct GeminiCli {
    program: String,
    timeout: Duration,
    runtime: tokio::runtime::Runtime,
}

impl GeminiCli {
    pub fn new(program: impl Into<String>, timeout: Duration) -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        Ok(Self {
            program: program.into(),
            timeout,
            runtime,
        })
    }
}

impl PromptRunner for GeminiCli {
    fn run(&self, prompt: &str) -> Result<RunOutput, RunError> {
        self.runtime.block_on(async {
            let child = Command::new(&self.program)
                .arg("-p")
                .arg(prompt)
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .kill_on_drop(true)
                .spawn()
                .map_err(|source| RunError::Launch {
                    program: self.program.clone(),
                    source,
                })?;

            let output = match timeout(self.timeout, child.wait_with_output()).await {
                Ok(result) => result?,
                // Dropping the wait future reaps the child via kill_on_drop
                Err(_) => return Err(RunError::TimedOut(self.timeout)),
            };

            Ok(RunOutput {
                exit_code: output.status.code().unwrap_or(-1),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        })
    }
}
