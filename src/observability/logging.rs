//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the `tracing` subscriber for the CLI
//! - Configure log level from config, overridable through `RUST_LOG`
//!
//! # Design Decisions
//! - Logs go to stderr so stdout carries only the JSON response

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive for a plain level such as `info`.
pub fn default_directive(level: &str) -> String {
    format!("cryptounifier={level},cu_wallet={level},warn")
}

/// Install the global subscriber. Later calls are ignored.
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(level)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
