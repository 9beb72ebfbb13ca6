//! Concurrent operations sharing one orchestrator.

mod common;

use std::collections::HashSet;
use std::sync::Arc;

use cnft_lifecycle::ledger::LedgerError;
use cnft_lifecycle::TransactionOrchestrator;
use common::{identity, mint_request, test_config, ScriptedLedger, SendBehavior};

#[tokio::test(start_paused = true)]
async fn test_concurrent_mints_keep_their_identities() {
    let ledger = ScriptedLedger::with(5000, 2);
    let alice = identity();
    let bob = identity();
    ledger.script(
        &alice,
        vec![
            SendBehavior::Fail(LedgerError::Rpc("busy".into())),
            SendBehavior::Fail(LedgerError::Rpc("busy".into())),
        ],
    );
    let orchestrator =
        Arc::new(TransactionOrchestrator::new(ledger.clone(), Arc::new(test_config())).unwrap());

    let (a, b) = tokio::join!(
        orchestrator.mint_and_resolve(mint_request(&alice)),
        orchestrator.mint_and_resolve(mint_request(&bob)),
    );
    let (a, b) = (a.unwrap(), b.unwrap());

    assert_ne!(a.id, b.id);
    assert_eq!(ledger.sends_for(&alice.pubkey()), 3);
    assert_eq!(ledger.sends_for(&bob.pubkey()), 1);

    let alice_effects = ledger.effects_for(&alice.pubkey());
    let bob_effects = ledger.effects_for(&bob.pubkey());
    assert_eq!(alice_effects.len(), 1);
    assert_eq!(bob_effects.len(), 1);
    assert_eq!(alice_effects[0].nonce, a.nonce);
    assert_eq!(bob_effects[0].nonce, b.nonce);
}

#[tokio::test(start_paused = true)]
async fn test_spawned_mints_resolve_distinct_assets() {
    let ledger = ScriptedLedger::with(5000, 1);
    let orchestrator = TransactionOrchestrator::new(ledger.clone(), Arc::new(test_config())).unwrap();

    let mut tasks = Vec::new();
    for _ in 0..8 {
        let orchestrator = orchestrator.clone();
        let payer = identity();
        tasks.push(tokio::spawn(async move {
            let asset = orchestrator.mint_and_resolve(mint_request(&payer)).await;
            (payer.pubkey(), asset)
        }));
    }

    let mut ids = HashSet::new();
    for task in tasks {
        let (owner, asset) = task.await.unwrap();
        let asset = asset.unwrap();
        assert_eq!(asset.tree, orchestrator.tree());
        let effects = ledger.effects_for(&owner);
        assert_eq!(effects.len(), 1);
        assert_eq!(effects[0].nonce, asset.nonce);
        ids.insert(asset.id);
    }
    assert_eq!(ids.len(), 8);
}
