//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod clock;
pub mod command_runner;

pub use clock::{Clock, FixedClock};
pub use command_runner::{CommandError, CommandRunner, Invocation};
