//! Stack deployer
//!
//! Stages a rendered compose file in the working directory, runs
//! `docker stack deploy` against it and removes the file again.
//!
//! Escalation is asymmetric: a failing deploy command is logged
//! and reported as [`DeployOutcome::CommandFailed`], while failing to stage or
//! to remove the file is an error. The staged file may contain secrets, so it
//! is removed on every path once it has been created.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::TempPath;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::domain::ports::{CommandError, CommandRunner, Invocation};
use crate::domain::value_objects::StackName;

const STAGED_SUFFIX: &str = ".yml";

/// Resolved deploy settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployOptions {
    /// Docker executable
    pub binary: PathBuf,
    pub stack: StackName,
    /// Directory the compose file is staged in
    pub workdir: PathBuf,
    /// Pass `--with-registry-auth`
    pub with_registry_auth: bool,
    /// Start of the staged file name
    pub file_hint: String,
}

impl DeployOptions {
    /// `<binary> stack deploy -c <compose_file> [--with-registry-auth] <stack>`
    pub fn invocation(&self, compose_file: &Path) -> Invocation {
        let invocation = Invocation::new(&self.binary)
            .arg("stack")
            .arg("deploy")
            .arg("-c")
            .arg(compose_file);
        let invocation = if self.with_registry_auth {
            invocation.arg("--with-registry-auth")
        } else {
            invocation
        };
        invocation.arg(self.stack.as_str())
    }
}

/// Result of a deploy whose staging and cleanup succeeded
#[derive(Debug)]
pub enum DeployOutcome {
    Deployed,
    /// The deploy command could not be launched or exited non-zero
    CommandFailed(CommandError),
}

impl DeployOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DeployOutcome::Deployed)
    }
}

/// Staging or cleanup failures
#[derive(Debug, Error)]
pub enum DeployError {
    #[error("failed to stage compose file in {}", .workdir.display())]
    Stage {
        workdir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to remove staged compose file {}", .path.display())]
    Cleanup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Runs `docker stack deploy` through a [`CommandRunner`]
#[derive(Debug, Clone)]
pub struct Deployer<R> {
    runner: R,
}

impl<R: CommandRunner> Deployer<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Stage `rendered`, deploy it, and remove the staged file
    pub fn run(
        &self,
        rendered: &[u8],
        opts: &DeployOptions,
    ) -> Result<DeployOutcome, DeployError> {
        let staged = stage(rendered, opts)?;
        debug!(path = %staged.display(), bytes = rendered.len(), "staged compose file");

        let invocation = opts.invocation(&staged);
        info!(command = %invocation, "deploying stack {}", opts.stack);

        let outcome = match self.runner.run(&invocation) {
            Ok(()) => DeployOutcome::Deployed,
            Err(err) => {
                error!(error = %err, "Running docker failed");
                DeployOutcome::CommandFailed(err)
            }
        };

        cleanup(staged)?;
        Ok(outcome)
    }
}

fn stage(rendered: &[u8], opts: &DeployOptions) -> Result<TempPath, DeployError> {
    let stage_error = |source| DeployError::Stage {
        workdir: opts.workdir.clone(),
        source,
    };

    // Dropping the NamedTempFile on an early return deletes it.
    let mut file = tempfile::Builder::new()
        .prefix(&opts.file_hint)
        .suffix(STAGED_SUFFIX)
        .tempfile_in(&opts.workdir)
        .map_err(stage_error)?;
    file.write_all(rendered).map_err(stage_error)?;
    file.flush().map_err(stage_error)?;

    Ok(file.into_temp_path())
}

fn cleanup(staged: TempPath) -> Result<(), DeployError> {
    let path = staged.to_path_buf();
    match staged.close() {
        Ok(()) => {
            debug!(path = %path.display(), "removed staged compose file");
            Ok(())
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "staged compose file already gone");
            Ok(())
        }
        Err(source) => Err(DeployError::Cleanup { path, source }),
    }
}
