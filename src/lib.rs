//! Compressed-asset transaction lifecycle library.
//!
//! Submits prepared ledger transactions with bounded retry, confirms them,
//! and reconciles the confirmed result into a fee report or a minted asset
//! identity.

pub mod config;
pub mod error;
pub mod ledger;
pub mod lifecycle;
pub mod observability;
pub mod orchestrator;
pub mod resilience;
pub mod submission;

pub use config::schema::CoreConfig;
pub use error::{OrchestrationError, OrchestrationResult};
pub use ledger::{LedgerClient, SigningIdentity};
pub use lifecycle::{CancelHandle, CancelToken, Stage};
pub use orchestrator::{SubmitOutcome, TransactionOrchestrator};
pub use submission::SubmitRequest;
