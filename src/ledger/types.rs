//! Ledger-facing data model and error definitions.

use std::fmt;

use serde::{Deserialize, Serialize};
use solana_hash::Hash;
use solana_instruction::Instruction;
use solana_pubkey::Pubkey;
use thiserror::Error;

/// Errors reported by the ledger client collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// Preflight simulation or the ledger itself rejected the transaction.
    #[error("Transaction rejected: {0}")]
    Rejected(String),

    /// The submission anchor passed its last valid block height.
    #[error("Submission anchor expired")]
    AnchorExpired,

    /// The requested record is not (yet) queryable.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A ledger call exceeded its deadline, in milliseconds.
    #[error("RPC timeout after {0} ms")]
    Timeout(u64),
}

/// Result type for ledger client calls.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// How deeply confirmed a transaction must be before it is treated as durable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    Processed,
    Confirmed,
    Finalized,
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Commitment::Processed => "processed",
            Commitment::Confirmed => "confirmed",
            Commitment::Finalized => "finalized",
        };
        f.write_str(s)
    }
}

/// Recent block reference bounding a submission's validity window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionAnchor {
    /// Recent blockhash the transaction is anchored to.
    pub blockhash: Hash,
    /// Last block height at which the anchor is still accepted.
    pub last_valid_block_height: u64,
}

impl SubmissionAnchor {
    pub const fn new(blockhash: Hash, last_valid_block_height: u64) -> Self {
        Self {
            blockhash,
            last_valid_block_height,
        }
    }

    /// True once the ledger has moved past the validity window.
    pub const fn is_expired(&self, current_block_height: u64) -> bool {
        current_block_height > self.last_valid_block_height
    }
}

/// Options applied to every submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendOptions {
    /// Skip preflight simulation when true.
    pub skip_preflight: bool,
    /// Commitment awaited before the attempt counts as confirmed.
    pub commitment: Commitment,
}

/// An immutable unit of ledger work.
///
/// Built with [`PreparedTransactionBuilder`]; once built it can only be read
/// or handed over by value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedTransaction {
    instructions: Vec<Instruction>,
    fee_payer: Option<Pubkey>,
    label: String,
}

impl PreparedTransaction {
    pub fn builder(label: impl Into<String>) -> PreparedTransactionBuilder {
        PreparedTransactionBuilder::new(label)
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Explicit fee payer; `None` means the signing identity pays.
    pub fn fee_payer(&self) -> Option<Pubkey> {
        self.fee_payer
    }

    /// Diagnostic name used in logs.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

/// Composes instructions into a [`PreparedTransaction`].
#[derive(Debug, Clone, Default)]
pub struct PreparedTransactionBuilder {
    instructions: Vec<Instruction>,
    fee_payer: Option<Pubkey>,
    label: String,
}

impl PreparedTransactionBuilder {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            instructions: Vec::new(),
            fee_payer: None,
            label: label.into(),
        }
    }

    /// Appends one instruction.
    #[must_use]
    pub fn add_instruction(mut self, instruction: Instruction) -> Self {
        self.instructions.push(instruction);
        self
    }

    /// Appends every instruction of an already prepared transaction.
    #[must_use]
    pub fn extend_from(mut self, other: &PreparedTransaction) -> Self {
        self.instructions.extend(other.instructions.iter().cloned());
        self
    }

    #[must_use]
    pub fn fee_payer(mut self, payer: Pubkey) -> Self {
        self.fee_payer = Some(payer);
        self
    }

    pub fn build(self) -> PreparedTransaction {
        PreparedTransaction {
            instructions: self.instructions,
            fee_payer: self.fee_payer,
            label: self.label,
        }
    }
}

/// Signature as handed back by the ledger client, before normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawSignature {
    /// Raw signature bytes.
    Bytes(Vec<u8>),
    /// Already encoded in its canonical string form.
    Encoded(String),
    /// Anything else the client produced.
    Other(serde_json::Value),
}

/// Canonical (base58) display form of a transaction signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxHash(String);

impl TxHash {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Settlement data reported alongside a confirmation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementMeta {
    /// Slot the transaction landed in.
    pub slot: u64,
    /// Execution error, if the ledger recorded one.
    pub err: Option<String>,
}

/// Terminal outcome of a successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmationResult {
    pub signature: RawSignature,
    pub settlement: SettlementMeta,
}

/// Settlement record fetched by signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDetails {
    pub slot: u64,
    pub meta: Option<TransactionMeta>,
}

/// Metadata section of a settlement record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionMeta {
    /// Fee paid in the ledger's smallest unit.
    pub fee: u64,
    pub err: Option<String>,
}

/// Paid fee in raw units together with its denomination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeReport {
    pub raw_amount: u64,
    pub decimals: u32,
}

impl FeeReport {
    pub const fn new(raw_amount: u64, decimals: u32) -> Self {
        Self {
            raw_amount,
            decimals,
        }
    }

    /// Human-denominated value: `raw_amount / 10^decimals`.
    pub fn value(&self) -> f64 {
        let exponent = i32::try_from(self.decimals).unwrap_or(i32::MAX);
        self.raw_amount as f64 / 10f64.powi(exponent)
    }
}

/// Leaf record decoded from a confirmed mint transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeafEvent {
    /// Position of the leaf in the tree.
    pub nonce: u64,
    pub owner: Pubkey,
    pub delegate: Pubkey,
    pub data_hash: [u8; 32],
    pub creator_hash: [u8; 32],
}

/// Stable identifier of one compressed asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetIdentity {
    /// Program-derived asset id.
    pub id: Pubkey,
    pub tree: Pubkey,
    pub nonce: u64,
}

impl fmt::Display for AssetIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}
