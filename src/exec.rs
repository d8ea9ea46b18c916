//! Host shell access.
//!
//! One [`SystemShell`] serves both uses of the shell: probing command
//! conditions during evaluation, and running the collapsed commands.

use crate::condition::ShellProbe;
use anyhow::{Context, Result};
use std::process::{Command, ExitStatus, Stdio};

/// Default shell program.
pub const DEFAULT_SHELL: &str = "sh";

pub struct SystemShell {
    program: String,
}

impl SystemShell {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command(&self, script: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-c").arg(script);
        cmd
    }

    /// Run `script` with inherited stdio and return its exit code.
    pub fn run(&self, script: &str) -> Result<i32> {
        let status = self
            .command(script)
            .status()
            .with_context(|| format!("failed to run {}", self.program))?;
        Ok(exit_code(status))
    }
}

impl ShellProbe for SystemShell {
    fn succeeds(&self, command: &str) -> bool {
        // stdout is discarded so dry-run output stays clean
        match self.command(command).stdout(Stdio::null()).status() {
            Ok(status) => {
                tracing::debug!(command, code = ?status.code(), "condition probe");
                status.success()
            }
            Err(e) => {
                tracing::debug!(command, "condition probe failed to start: {e}");
                false
            }
        }
    }
}

/// Map a child's exit status to a process exit code, shell style.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}
