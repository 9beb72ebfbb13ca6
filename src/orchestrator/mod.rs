//! Transaction orchestrator.
//!
//! # Operations
//! - `submit_and_confirm`: submit at the fee commitment, derive the display
//!   hash, extract the paid fee
//! - `mint_and_resolve`: submit at the mint commitment, derive the display
//!   hash, poll for the leaf, derive the asset identity
//!
//! Stages run strictly in sequence for one operation. Independent operations
//! may run concurrently on one orchestrator: it holds no per-call state, and
//! the signing identity travels with each request.

mod core;

pub use self::core::{SubmitOutcome, TransactionOrchestrator};
