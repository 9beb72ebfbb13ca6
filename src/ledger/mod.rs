//! Ledger integration subsystem.
//!
//! # Data Flow
//! ```text
//! Environment Variables (secret key)
//!     → identity.rs (per-call signing identity)
//! Caller-built instructions
//!     → types.rs (PreparedTransaction)
//!     → client.rs (collaborator boundary with deadlines)
//!     → anchor.rs (recent blockhash, supplied or fetched)
//! Confirmed mint
//!     → asset.rs (pure asset id derivation)
//! ```
//!
//! # Security Constraints
//! - Secret keys ONLY from environment variables or caller memory
//! - Never log secret keys
//! - All ledger calls have configurable timeouts

pub mod anchor;
pub mod asset;
pub mod client;
pub mod identity;
pub mod types;

pub use anchor::AnchorProvider;
pub use asset::{derive_asset_id, BUBBLEGUM_PROGRAM_ID};
pub use client::{LedgerClient, LedgerHandle};
pub use identity::{IdentityError, SigningIdentity};
pub use types::{
    AssetIdentity, Commitment, ConfirmationResult, FeeReport, LeafEvent, LedgerError,
    LedgerResult, PreparedTransaction, PreparedTransactionBuilder, RawSignature, SendOptions,
    SettlementMeta, SubmissionAnchor, TransactionDetails, TransactionMeta, TxHash,
};
