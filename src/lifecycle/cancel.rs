//! Cancellation signal for in-flight operations.

use tokio::sync::watch;

/// Owner side of a cancellation signal.
///
/// Provides a watch channel that any number of operations can observe.
/// Operations check it only between attempts; an in-flight ledger call is
/// always allowed to finish.
#[derive(Debug)]
pub struct CancelHandle {
    /// Watch channel sender.
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Create a new, untriggered signal.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    /// Hand out a token observing this signal.
    pub fn token(&self) -> CancelToken {
        CancelToken {
            rx: self.tx.subscribe(),
        }
    }

    /// Trigger the signal.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    /// Number of live tokens.
    pub fn token_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for CancelHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Observer side of a cancellation signal.
#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once the signal fires.
    ///
    /// If the handle is dropped without cancelling, this never resolves.
    pub async fn cancelled(&mut self) {
        let closed = self.rx.wait_for(|cancelled| *cancelled).await.is_err();
        if closed {
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_cancel_is_observed_by_all_tokens() {
        let handle = CancelHandle::new();
        let a = handle.token();
        let b = a.clone();
        assert_eq!(handle.token_count(), 2);
        assert!(!a.is_cancelled());

        handle.cancel();
        assert!(a.is_cancelled());
        assert!(b.is_cancelled());
    }

    #[tokio::test]
    async fn test_cancelled_resolves() {
        let handle = CancelHandle::new();
        let mut token = handle.token();
        handle.cancel();
        token.cancelled().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_handle_never_resolves() {
        let handle = CancelHandle::new();
        let mut token = handle.token();
        drop(handle);
        let waited = tokio::time::timeout(Duration::from_secs(5), token.cancelled()).await;
        assert!(waited.is_err());
        assert!(!token.is_cancelled());
    }
}
