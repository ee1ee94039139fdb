// crates/host/src/log.rs

//! Logging setup and coloured stderr banners.
//!
//! stdout carries only the result string, so everything here goes to stderr.

use std::fmt::Display;

use idea_agent_core::ExecutionMode;
use tracing_subscriber::EnvFilter;

// ANSI color codes
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

const BLUE: &str = "\x1b[34m";
const MAGENTA: &str = "\x1b[35m";

/// Install the tracing subscriber. `RUST_LOG` overrides the default `info`.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn mode_color(mode: ExecutionMode) -> &'static str {
    match mode {
        ExecutionMode::Standalone => BLUE,
        ExecutionMode::Hosted => MAGENTA,
    }
}

fn mode_name(mode: ExecutionMode) -> &'static str {
    match mode {
        ExecutionMode::Standalone => "Standalone",
        ExecutionMode::Hosted => "Hosted",
    }
}

/// One-line banner naming the mode and what is being processed.
pub fn banner(mode: ExecutionMode, detail: impl Display) {
    eprintln!(
        "{}{BOLD}[{}]{RESET} {DIM}{}{RESET}",
        mode_color(mode),
        mode_name(mode),
        detail
    );
}
