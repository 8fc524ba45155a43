//! Resolved run configuration

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::value_objects::{ConfigPrefix, StackName, StackNameError};
use crate::infrastructure::DeployOptions;

/// Default compose file, relative to the current directory
pub const DEFAULT_COMPOSE_FILE: &str = "docker-compose.yml";
/// Default docker executable, resolved through `PATH`
pub const DEFAULT_DOCKER_BINARY: &str = "docker";
/// Default staging directory
pub const DEFAULT_WORKDIR: &str = ".";

/// Invalid or missing configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing stack name: pass --stack or set STACK_ROTATE_STACK")]
    MissingStack,

    #[error("invalid stack name")]
    InvalidStack(#[from] StackNameError),
}

/// What to do with the rewritten compose file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Stage it and run `docker stack deploy`
    #[default]
    Deploy,
    /// Print it to stdout and stop
    Print,
}

/// Immutable settings for one run, resolved once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedeployConfig {
    pub stack: StackName,
    pub compose_file: PathBuf,
    pub docker_binary: PathBuf,
    pub workdir: PathBuf,
    /// User-supplied suffix; `None` means "use the current timestamp"
    pub suffix: Option<String>,
    pub with_registry_auth: bool,
    pub mode: RunMode,
}

impl RedeployConfig {
    /// Configuration with built-in defaults for everything but the stack
    pub fn new(stack: StackName) -> Self {
        Self {
            stack,
            compose_file: PathBuf::from(DEFAULT_COMPOSE_FILE),
            docker_binary: PathBuf::from(DEFAULT_DOCKER_BINARY),
            workdir: PathBuf::from(DEFAULT_WORKDIR),
            suffix: None,
            with_registry_auth: false,
            mode: RunMode::Deploy,
        }
    }

    /// Set the suffix; an empty suffix counts as none
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        let suffix = suffix.into();
        self.suffix = (!suffix.is_empty()).then_some(suffix);
        self
    }

    pub fn with_mode(mut self, mode: RunMode) -> Self {
        self.mode = mode;
        self
    }

    /// Options handed to the deployer for a given prefix
    pub fn deploy_options(&self, prefix: &ConfigPrefix) -> DeployOptions {
        DeployOptions {
            binary: self.docker_binary.clone(),
            stack: self.stack.clone(),
            workdir: self.workdir.clone(),
            with_registry_auth: self.with_registry_auth,
            file_hint: prefix.file_name_hint(),
        }
    }
}
