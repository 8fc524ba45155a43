//! Process runner
//!
//! Runs invocations as child processes with stdin/stdout/stderr inherited, so
//! the deploy command talks to the terminal directly.

use std::process::{Command, Stdio};

use crate::domain::ports::{CommandError, CommandRunner, Invocation};

/// Runs commands on the local machine
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, invocation: &Invocation) -> Result<(), CommandError> {
        let status = Command::new(invocation.program())
            .args(invocation.args())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| CommandError::Spawn {
                command: invocation.to_string(),
                source,
            })?;

        if !status.success() {
            return Err(CommandError::Failed {
                command: invocation.to_string(),
                code: status.code(),
            });
        }

        Ok(())
    }
}
