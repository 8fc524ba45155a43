//! Common test utilities for stack-rotate CLI tests.
//!
//! This module provides:
//! - `TestEnv`: isolated working directory plus helpers to run the binary
//! - `FakeDocker`: a shell script standing in for the docker CLI
//! - Fixtures: reusable compose files

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
