//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Flags mirror `docker stack deploy` where they overlap (`-c`, `--with-registry-auth`)
//! - String options can also come from `STACK_ROTATE_*` environment variables
//! - `--stack` is validated after parsing so a missing stack is a [`ConfigError`]

use std::path::PathBuf;

use clap::Parser;

use crate::config::{
    ConfigError, RedeployConfig, RunMode, DEFAULT_COMPOSE_FILE, DEFAULT_DOCKER_BINARY,
    DEFAULT_WORKDIR,
};
use crate::domain::value_objects::StackName;

/// stack-rotate - redeploy a swarm stack with freshly prefixed configs
#[derive(Parser, Debug)]
#[command(name = "stack-rotate")]
#[command(author, version, about, long_about = None)]
#[command(
    after_help = "Configs are renamed to <stack>_<prefix>_<name>; without --prefix the current Unix timestamp is used."
)]
pub struct Cli {
    /// Path to a Compose file
    #[arg(
        short = 'c',
        long,
        env = "STACK_ROTATE_COMPOSE_FILE",
        default_value = DEFAULT_COMPOSE_FILE
    )]
    pub compose_file: PathBuf,

    /// Send registry authentication details to Swarm agents
    #[arg(long)]
    pub with_registry_auth: bool,

    /// Alternative docker binary
    #[arg(
        short = 'd',
        long,
        env = "STACK_ROTATE_DOCKER_BINARY",
        default_value = DEFAULT_DOCKER_BINARY
    )]
    pub docker_binary: PathBuf,

    /// Suffix used in config prefixes (defaults to the current Unix timestamp)
    #[arg(short = 'p', long, env = "STACK_ROTATE_PREFIX")]
    pub prefix: Option<String>,

    /// Stack to be redeployed
    #[arg(short = 's', long, env = "STACK_ROTATE_STACK")]
    pub stack: Option<String>,

    /// Directory the rewritten compose file is staged in
    #[arg(
        short = 'w',
        long,
        env = "STACK_ROTATE_WORKDIR",
        default_value = DEFAULT_WORKDIR
    )]
    pub workdir: PathBuf,

    /// Output YAML rather than redeploy
    #[arg(short = 'o', long)]
    pub output: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Resolve the parsed flags into a run configuration
    pub fn to_config(&self) -> Result<RedeployConfig, ConfigError> {
        let stack = self
            .stack
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingStack)?;

        let mut config = RedeployConfig::new(StackName::new(stack)?)
            .with_suffix(self.prefix.clone().unwrap_or_default())
            .with_mode(if self.output {
                RunMode::Print
            } else {
                RunMode::Deploy
            });
        config.compose_file = self.compose_file.clone();
        config.docker_binary = self.docker_binary.clone();
        config.workdir = self.workdir.clone();
        config.with_registry_auth = self.with_registry_auth;
        Ok(config)
    }
}
