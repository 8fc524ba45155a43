//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod config_prefix;
mod stack_name;

pub use config_prefix::ConfigPrefix;
pub use stack_name::{StackName, StackNameError};
