//! Infrastructure Layer
//!
//! Concrete implementations of domain ports and the I/O around them.
//!
//! - `compose/` - Compose YAML loading, schema checks and interpolation
//! - `environment` - Interpolation variables from the process environment
//! - `deployer` - Staged `docker stack deploy`
//! - `process` - `CommandRunner` backed by child processes
//! - `clock` - `Clock` backed by the system time

pub mod clock;
pub mod compose;
pub mod deployer;
pub mod environment;
pub mod process;

pub use clock::SystemClock;
pub use compose::{ComposeError, ComposeLoader};
pub use deployer::{DeployError, DeployOptions, DeployOutcome, Deployer};
pub use environment::{Environment, EnvironmentError};
pub use process::ProcessRunner;
