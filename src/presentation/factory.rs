//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use crate::application::Redeploy;
use crate::infrastructure::{Deployer, ProcessRunner, SystemClock};

static SYSTEM_CLOCK: SystemClock = SystemClock;

/// Type alias for the concrete Redeploy use case with all dependencies
pub type ConcreteRedeploy = Redeploy<'static, ProcessRunner>;

/// Create a redeploy use case backed by the system clock and real processes
pub fn create_redeploy_use_case() -> ConcreteRedeploy {
    Redeploy::new(&SYSTEM_CLOCK, Deployer::new(ProcessRunner))
}
