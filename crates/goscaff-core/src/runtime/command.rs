//! Running external tools (`go`, `git`) for a plan

use crate::config::Toolchain;
use crate::error::{Result, ScaffoldError};
use crate::plan::PlannedCommand;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

/// Upper bound for a single command; `go get` on a cold module cache is the slow one
pub const COMMAND_TIMEOUT: Duration = Duration::from_secs(180);

/// External tools a plan can invoke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    Go,
    Git,
}

impl Tool {
    pub fn default_binary(&self) -> &'static str {
        match self {
            Tool::Go => "go",
            Tool::Git => "git",
        }
    }
}

/// Seam between the executor and the outside world
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run one command in `cwd`, failing on a non-zero exit
    async fn run(&mut self, cwd: &Path, command: &PlannedCommand) -> Result<()>;
}

/// Runs commands for real, capturing combined output for error reports
#[derive(Debug, Clone)]
pub struct SystemRunner {
    toolchain: Toolchain,
    timeout: Duration,
}

impl SystemRunner {
    pub fn new(toolchain: Toolchain) -> Self {
        Self {
            toolchain,
            timeout: COMMAND_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl CommandRunner for SystemRunner {
    async fn run(&mut self, cwd: &Path, command: &PlannedCommand) -> Result<()> {
        let program = self.toolchain.binary(command.tool);
        let shown = command.to_string();
        tracing::debug!(program, cwd = %cwd.display(), command = %shown, "running command");

        let mut cmd = TokioCommand::new(program);
        cmd.args(&command.args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = match timeout(self.timeout, cmd.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(source)) => {
                return Err(ScaffoldError::CommandSpawn {
                    command: shown,
                    source,
                })
            }
            Err(_) => {
                return Err(ScaffoldError::CommandTimeout {
                    command: shown,
                    timeout: self.timeout,
                })
            }
        };

        if !output.status.success() {
            let mut combined = String::from_utf8_lossy(&output.stdout).trim().to_string();
            let stderr = String::from_utf8_lossy(&output.stderr);
            if !stderr.trim().is_empty() {
                if !combined.is_empty() {
                    combined.push('\n');
                }
                combined.push_str(stderr.trim());
            }
            if combined.is_empty() {
                combined = format!("exit code {}", output.status.code().unwrap_or(-1));
            }
            return Err(ScaffoldError::CommandFailed {
                command: shown,
                output: combined,
            });
        }

        tracing::debug!(command = %shown, "command finished");
        Ok(())
    }
}

/// Records commands instead of running them (`--skip-commands`)
#[derive(Debug, Clone, Default)]
pub struct SkipRunner {
    pub skipped: Vec<String>,
}

impl CommandRunner for SkipRunner {
    async fn run(&mut self, _cwd: &Path, command: &PlannedCommand) -> Result<()> {
        tracing::info!(command = %command, "skipping command");
        self.skipped.push(command.to_string());
        Ok(())
    }
}
