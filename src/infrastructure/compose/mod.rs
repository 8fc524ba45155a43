//! Compose file parsing
//!
//! Turns Compose YAML into a [`ComposeDocument`](crate::domain::entities::ComposeDocument).

pub mod interpolation;
mod loader;
pub mod schema;

pub use interpolation::{interpolate, interpolate_value, InterpolationError};
pub use loader::{ComposeError, ComposeLoader};
pub use schema::SchemaError;
