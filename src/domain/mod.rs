//! Domain Layer
//!
//! Pure config-rotation logic without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - Compose document model
//! - `value_objects/` - Immutable value types (StackName, ConfigPrefix)
//! - `services/` - The config prefixer
//! - `ports/` - Interface definitions for infrastructure (Clock, CommandRunner)

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
