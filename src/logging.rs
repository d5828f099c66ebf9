//! Tracing setup for the audit trail.
//!
//! `RUST_LOG` controls the filter (default `info`). Human runs log to stdout;
//! `--json` runs log to stderr so stdout carries only the report.

use std::io::{self, IsTerminal};

use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stdout,
    Stderr,
}

pub fn init(target: LogTarget) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false);

    match target {
        LogTarget::Stdout => builder
            .with_ansi(io::stdout().is_terminal())
            .with_writer(io::stdout)
            .try_init(),
        LogTarget::Stderr => builder
            .with_ansi(io::stderr().is_terminal())
            .with_writer(io::stderr)
            .try_init(),
    }
}
