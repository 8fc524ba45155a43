//! Logging setup
//!
//! All diagnostics go to stderr so `--output` keeps stdout clean for YAML.
//! `RUST_LOG` overrides the level derived from `-v`.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive for a `-v` count
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "stack_rotate=info",
        1 => "stack_rotate=debug",
        _ => "stack_rotate=trace",
    }
}

/// Install the global tracing subscriber
pub fn init(verbosity: u8, json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let registry = tracing_subscriber::registry().with(filter);
    let installed = if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(std::io::stderr().is_terminal())
                    .with_target(false)
                    .compact(),
            )
            .try_init()
    };

    installed.context("Failed to initialize tracing subscriber")
}
