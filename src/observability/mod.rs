//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Retriers and orchestrator produce:
//!     → logging.rs (structured log events, one span per operation id)
//!     → metrics.rs (counters, histograms)
//! ```
//!
//! # Design Decisions
//! - Operation ID flows through every event of one operation
//! - Failures are logged where they happen and still returned as typed errors

pub mod logging;
pub mod metrics;
