//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! wallet::request produces:
//!     → tracing spans/events (request_id, path, outcome)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → logging.rs subscriber (stderr) when running the CLI
//!     → whatever recorder / subscriber the host application installs
//! ```
//!
//! # Design Decisions
//! - The library only emits; installing subscribers is the binary's job
//! - Metrics go through the `metrics` facade and are no-ops without a recorder

pub mod logging;
pub mod metrics;
