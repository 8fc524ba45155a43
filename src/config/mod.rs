//! Configuration module
//!
//! Settings are resolved once, in priority order:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (STACK_ROTATE_*)
//! 3. Built-in defaults (lowest priority)
//!
//! The result is an immutable [`RedeployConfig`] passed down explicitly.

mod types;

pub use types::{
    ConfigError, RedeployConfig, RunMode, DEFAULT_COMPOSE_FILE, DEFAULT_DOCKER_BINARY,
    DEFAULT_WORKDIR,
};
