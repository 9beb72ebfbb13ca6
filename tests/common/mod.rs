//! Shared utilities for integration testing.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cnft_lifecycle::config::CoreConfig;
use cnft_lifecycle::ledger::{
    Commitment, ConfirmationResult, LeafEvent, LedgerClient, LedgerError, LedgerResult,
    PreparedTransaction, RawSignature, SendOptions, SettlementMeta, SigningIdentity,
    SubmissionAnchor, TransactionDetails, TransactionMeta, TxHash,
};
use cnft_lifecycle::SubmitRequest;
use solana_hash::Hash;
use solana_instruction::Instruction;
use solana_keypair::Keypair;
use solana_pubkey::Pubkey;

/// What the ledger does with one send.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub enum SendBehavior {
    /// Reject without landing.
    Fail(LedgerError),
    /// Land on the ledger, then lose the response.
    LandThenLose,
    /// Land and confirm.
    Land,
}

/// One transaction that landed on the ledger.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct Effect {
    pub owner: Pubkey,
    pub label: String,
    pub nonce: u64,
    pub signature: TxHash,
}

#[derive(Default)]
struct State {
    scripts: HashMap<Pubkey, VecDeque<SendBehavior>>,
    effects: Vec<Effect>,
    sends: HashMap<Pubkey, u32>,
    leaf_polls: HashMap<String, u32>,
    commitments: Vec<Commitment>,
    anchors_fetched: u32,
}

/// In-memory ledger with per-identity scripted send outcomes.
///
/// Sends not covered by a script land. Every landed send appends one
/// `Effect`, whether or not the caller saw the confirmation.
pub struct ScriptedLedger {
    state: Mutex<State>,
    fee: u64,
    leaf_lag: u32,
}

#[allow(dead_code)]
impl ScriptedLedger {
    pub fn new() -> Arc<Self> {
        Self::with(5000, 0)
    }

    /// `leaf_lag` decodes of each signature fail before its leaf appears.
    pub fn with(fee: u64, leaf_lag: u32) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(State::default()),
            fee,
            leaf_lag,
        })
    }

    pub fn script(&self, identity: &SigningIdentity, behaviors: Vec<SendBehavior>) {
        self.state
            .lock()
            .unwrap()
            .scripts
            .insert(identity.pubkey(), behaviors.into());
    }

    pub fn effects(&self) -> Vec<Effect> {
        self.state.lock().unwrap().effects.clone()
    }

    pub fn effects_for(&self, owner: &Pubkey) -> Vec<Effect> {
        self.effects()
            .into_iter()
            .filter(|e| &e.owner == owner)
            .collect()
    }

    pub fn sends_for(&self, owner: &Pubkey) -> u32 {
        self.state
            .lock()
            .unwrap()
            .sends
            .get(owner)
            .copied()
            .unwrap_or(0)
    }

    pub fn total_leaf_polls(&self) -> u32 {
        self.state.lock().unwrap().leaf_polls.values().sum()
    }

    pub fn commitments(&self) -> Vec<Commitment> {
        self.state.lock().unwrap().commitments.clone()
    }

    pub fn anchors_fetched(&self) -> u32 {
        self.state.lock().unwrap().anchors_fetched
    }
}

#[async_trait]
impl LedgerClient for ScriptedLedger {
    async fn latest_anchor(&self, _commitment: Commitment) -> LedgerResult<SubmissionAnchor> {
        let mut state = self.state.lock().unwrap();
        state.anchors_fetched += 1;
        let n = state.anchors_fetched;
        Ok(SubmissionAnchor::new(
            Hash::new_from_array([n as u8; 32]),
            1_000 + n as u64,
        ))
    }

    async fn send_and_confirm(
        &self,
        tx: &PreparedTransaction,
        identity: &SigningIdentity,
        _anchor: &SubmissionAnchor,
        options: &SendOptions,
    ) -> LedgerResult<ConfirmationResult> {
        // yield so concurrent operations interleave
        tokio::task::yield_now().await;

        let owner = identity.pubkey();
        let mut state = self.state.lock().unwrap();
        state.commitments.push(options.commitment);
        *state.sends.entry(owner).or_default() += 1;
        let behavior = state
            .scripts
            .get_mut(&owner)
            .and_then(VecDeque::pop_front)
            .unwrap_or(SendBehavior::Land);

        if let SendBehavior::Fail(err) = behavior {
            return Err(err);
        }

        let nonce = state.effects.len() as u64;
        let bytes = [nonce as u8 + 1; 64];
        let signature = TxHash::new(bs58::encode(bytes).into_string());
        state.effects.push(Effect {
            owner,
            label: tx.label().to_string(),
            nonce,
            signature,
        });

        match behavior {
            SendBehavior::LandThenLose => Err(LedgerError::Timeout(30_000)),
            _ => Ok(ConfirmationResult {
                signature: RawSignature::Bytes(bytes.to_vec()),
                settlement: SettlementMeta {
                    slot: 200 + nonce,
                    err: None,
                },
            }),
        }
    }

    async fn transaction_details(
        &self,
        signature: &TxHash,
        commitment: Commitment,
    ) -> LedgerResult<Option<TransactionDetails>> {
        let mut state = self.state.lock().unwrap();
        state.commitments.push(commitment);
        Ok(state
            .effects
            .iter()
            .find(|e| &e.signature == signature)
            .map(|e| TransactionDetails {
                slot: 200 + e.nonce,
                meta: Some(TransactionMeta {
                    fee: self.fee,
                    err: None,
                }),
            }))
    }

    async fn decode_leaf_event(&self, signature: &TxHash) -> LedgerResult<LeafEvent> {
        let mut state = self.state.lock().unwrap();
        let polls = state
            .leaf_polls
            .entry(signature.to_string())
            .or_default();
        *polls += 1;
        if *polls <= self.leaf_lag {
            return Err(LedgerError::NotFound(signature.to_string()));
        }

        state
            .effects
            .iter()
            .find(|e| &e.signature == signature)
            .map(|e| LeafEvent {
                nonce: e.nonce,
                owner: e.owner,
                delegate: e.owner,
                data_hash: [e.nonce as u8; 32],
                creator_hash: [0; 32],
            })
            .ok_or_else(|| LedgerError::NotFound(signature.to_string()))
    }
}

/// Configuration with fresh tree and collection addresses.
pub fn test_config() -> CoreConfig {
    let mut config = CoreConfig::default();
    config.ledger.environment = "localnet".to_string();
    config.ledger.tree_address = Pubkey::new_unique().to_string();
    config.ledger.collection_address = Pubkey::new_unique().to_string();
    config
}

pub fn identity() -> SigningIdentity {
    SigningIdentity::from_keypair(Keypair::new())
}

#[allow(dead_code)]
pub fn mint_request(identity: &SigningIdentity) -> SubmitRequest {
    let tx = PreparedTransaction::builder("mint")
        .add_instruction(Instruction::new_with_bytes(
            Pubkey::new_unique(),
            &[7],
            vec![],
        ))
        .fee_payer(identity.pubkey())
        .build();
    SubmitRequest::new(tx, identity.clone())
}
