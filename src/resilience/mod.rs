//! Resilience primitives for ledger calls.
//!
//! # Data Flow
//! ```text
//! Ledger call:
//!     → timeouts.rs (per-call deadline, mapped to LedgerError::Timeout)
//!     → On failure: retries.rs (fixed-interval pause, cancellable)
//! ```
//!
//! # Design Decisions
//! - Every remote call carries a deadline
//! - Retry intervals are fixed; no backoff or jitter
//! - Pauses suspend the task and yield to the runtime

pub mod retries;
pub mod timeouts;
