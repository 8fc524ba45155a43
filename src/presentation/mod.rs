//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Creating use cases with infrastructure dependencies
//!
//! ## Usage
//!
//! ```ignore
//! use stack_rotate::presentation::{factory, Cli};
//!
//! let config = cli.to_config()?;
//! let outcome = factory::create_redeploy_use_case().execute(&config, &env, &mut stdout)?;
//! ```

pub mod cli;
pub mod factory;

pub use cli::Cli;
pub use factory::create_redeploy_use_case;
