//! Redeploy use case
//!
//! load → compute prefix → rewrite → render → print or deploy.

use std::io::Write;

use tracing::{debug, info};

use crate::config::{RedeployConfig, RunMode};
use crate::domain::ports::{Clock, CommandError, CommandRunner};
use crate::domain::services::rewrite;
use crate::domain::value_objects::ConfigPrefix;
use crate::error::{StackRotateError, StackRotateResult};
use crate::infrastructure::{ComposeLoader, DeployOutcome, Deployer, Environment};

/// How a successful run ended
#[derive(Debug)]
pub enum RedeployOutcome {
    /// The rewritten file was printed
    Printed { prefix: ConfigPrefix },
    /// The stack was deployed
    Deployed { prefix: ConfigPrefix },
    /// The deploy command failed; the staged file was still removed
    CommandFailed {
        prefix: ConfigPrefix,
        error: CommandError,
    },
}

impl RedeployOutcome {
    pub fn prefix(&self) -> &ConfigPrefix {
        match self {
            RedeployOutcome::Printed { prefix }
            | RedeployOutcome::Deployed { prefix }
            | RedeployOutcome::CommandFailed { prefix, .. } => prefix,
        }
    }
}

/// Redeploy use case, wired with its collaborators
pub struct Redeploy<'a, R> {
    clock: &'a dyn Clock,
    deployer: Deployer<R>,
}

impl<'a, R: CommandRunner> Redeploy<'a, R> {
    pub fn new(clock: &'a dyn Clock, deployer: Deployer<R>) -> Self {
        Self { clock, deployer }
    }

    pub fn deployer(&self) -> &Deployer<R> {
        &self.deployer
    }

    /// Run once for `config`.
    ///
    /// In [`RunMode::Print`] the rewritten YAML goes to `out` and no command
    /// runs.
    pub fn execute<W: Write>(
        &self,
        config: &RedeployConfig,
        env: &Environment,
        out: &mut W,
    ) -> StackRotateResult<RedeployOutcome> {
        let prefix = ConfigPrefix::compute(&config.stack, config.suffix.as_deref(), self.clock);
        info!(stack = %config.stack, %prefix, "rotating configs");

        let doc = ComposeLoader::new(env).load_file(&config.compose_file)?;
        let rewritten = rewrite(&doc, &prefix)?;
        let rendered = rewritten.to_yaml()?;

        match config.mode {
            RunMode::Print => {
                out.write_all(rendered.as_bytes())
                    .and_then(|()| out.flush())
                    .map_err(StackRotateError::Output)?;
                debug!(bytes = rendered.len(), "printed rewritten compose file");
                Ok(RedeployOutcome::Printed { prefix })
            }
            RunMode::Deploy => {
                let opts = config.deploy_options(&prefix);
                match self.deployer.run(rendered.as_bytes(), &opts)? {
                    DeployOutcome::Deployed => Ok(RedeployOutcome::Deployed { prefix }),
                    DeployOutcome::CommandFailed(error) => {
                        Ok(RedeployOutcome::CommandFailed { prefix, error })
                    }
                }
            }
        }
    }
}
