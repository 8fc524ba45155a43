//! Application Layer
//!
//! Use cases that orchestrate the domain and infrastructure layers.

pub mod redeploy;

pub use redeploy::{Redeploy, RedeployOutcome};
