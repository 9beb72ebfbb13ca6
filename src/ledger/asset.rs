//! Compressed asset identity derivation.
//!
//! The asset id is a program-derived address over the tree and the leaf
//! nonce, so it is pure and needs no network access once the leaf is known.

use solana_pubkey::Pubkey;

use crate::ledger::types::{AssetIdentity, LeafEvent};

/// Bubblegum program owning compressed assets.
pub const BUBBLEGUM_PROGRAM_ID: Pubkey =
    Pubkey::from_str_const("BGUMAp9Gq7iTEuizy4pqaxsTyUCBK68MDfK752saRPUY");

/// Seed prefix of asset id derivation.
pub const ASSET_SEED: &[u8] = b"asset";

/// Derives the asset id of leaf `nonce` in `tree`.
pub fn derive_asset_id(tree: &Pubkey, nonce: u64) -> AssetIdentity {
    let (id, _bump) = Pubkey::find_program_address(
        &[ASSET_SEED, tree.as_ref(), &nonce.to_le_bytes()],
        &BUBBLEGUM_PROGRAM_ID,
    );
    AssetIdentity {
        id,
        tree: *tree,
        nonce,
    }
}

/// Derives the asset id for a decoded leaf.
pub fn asset_for_leaf(tree: &Pubkey, leaf: &LeafEvent) -> AssetIdentity {
    derive_asset_id(tree, leaf.nonce)
}
