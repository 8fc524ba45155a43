//! stack-rotate - redeploy Docker Swarm stacks with rotated config names
//!
//! Swarm config objects are immutable, so changing one in place breaks a
//! redeploy. stack-rotate reads a Compose file, renames every top-level config
//! to `<stack>_<suffix>_<name>`, rewires the services that mount them, and
//! either prints the result or runs `docker stack deploy` against it.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod presentation;

// Re-exports for convenience
pub use application::{Redeploy, RedeployOutcome};
pub use config::{ConfigError, RedeployConfig, RunMode};
pub use domain::entities::{ComposeDocument, ConfigEntry, ConfigReference, Service};
pub use domain::ports::{Clock, CommandError, CommandRunner, FixedClock, Invocation};
pub use domain::services::{rewrite, RewriteError};
pub use domain::value_objects::{ConfigPrefix, StackName};
pub use error::{StackRotateError, StackRotateResult};
pub use infrastructure::{
    ComposeLoader, DeployOptions, DeployOutcome, Deployer, Environment, ProcessRunner,
    SystemClock,
};
