//! Operation lifecycle subsystem.
//!
//! # Components
//! - `cancel.rs`: cancellation signal checked between retry attempts
//! - `stage.rs`: the per-operation stage machine
//!
//! # Stage Machine
//! ```text
//! BUILDING → SUBMITTING → CONFIRMING → (EXTRACTING_FEE | RESOLVING_LEAF) → DONE
//!      any stage ──terminal failure──▶ FAILED(reason)
//! ```
//!
//! # Stage Boundaries
//! The ledger client sends and waits for the requested commitment in one
//! call, so `SUBMITTING` spans both. A send that times out before reaching
//! its commitment is a failed submission attempt and reports `Submitting`.
//! `CONFIRMING` starts once a confirmation is in hand and covers turning the
//! returned signature into its display hash.

pub mod cancel;
pub mod stage;

pub use cancel::{CancelHandle, CancelToken};
pub use stage::{Stage, StageTracker};
