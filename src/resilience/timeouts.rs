//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap ledger calls with a deadline
//! - Map an elapsed deadline onto a distinct ledger error
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - A zero deadline disables the wrapper

use std::future::Future;
use std::time::Duration;

use tokio::time::timeout;

use crate::ledger::types::{LedgerError, LedgerResult};

/// Run a ledger future under a deadline.
pub async fn with_deadline<T, F>(deadline: Duration, fut: F) -> LedgerResult<T>
where
    F: Future<Output = LedgerResult<T>>,
{
    if deadline.is_zero() {
        return fut.await;
    }
    match timeout(deadline, fut).await {
        Ok(result) => result,
        Err(_) => Err(LedgerError::Timeout(as_millis(deadline))),
    }
}

fn as_millis(deadline: Duration) -> u64 {
    u64::try_from(deadline.as_millis()).unwrap_or(u64::MAX)
}
