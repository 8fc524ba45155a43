//! Error types for stack-rotate
//!
//! Each layer owns a `thiserror` enum; [`StackRotateError`] aggregates them for
//! the redeploy use case. Only `main` turns an error into a process exit.

use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::services::RewriteError;
use crate::infrastructure::{ComposeError, DeployError, EnvironmentError};

/// Result type alias for stack-rotate operations
pub type StackRotateResult<T> = Result<T, StackRotateError>;

/// Main error type for a redeploy run
#[derive(Error, Debug)]
pub enum StackRotateError {
    /// Missing or invalid flags
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Malformed process environment
    #[error(transparent)]
    Environment(#[from] EnvironmentError),

    /// Compose file unreadable or invalid
    #[error(transparent)]
    Compose(#[from] ComposeError),

    /// A service references a config that does not exist
    #[error(transparent)]
    Integrity(#[from] RewriteError),

    /// Rewritten document could not be serialized
    #[error("failed to render compose file")]
    Render(#[from] serde_yaml_ng::Error),

    /// Rewritten document could not be written to stdout
    #[error("failed to write compose file to stdout")]
    Output(#[source] std::io::Error),

    /// Staging or cleanup of the deploy file failed
    #[error(transparent)]
    Deploy(#[from] DeployError),
}
