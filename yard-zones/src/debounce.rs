//! Search input debouncing
//!
//! Single-shot timer per keystroke: a new input cancels the pending timer,
//! so only the latest value is delivered once input has been quiet for the
//! debounce delay.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Quiet period before a search term is applied
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Debounces values onto a channel. Must be used inside a tokio runtime.
#[derive(Debug)]
pub struct SearchDebouncer<T = String> {
    delay: Duration,
    tx: mpsc::UnboundedSender<T>,
    pending: Option<CancellationToken>,
}

impl<T: Send + 'static> SearchDebouncer<T> {
    /// Create a debouncer and the receiver its settled values arrive on
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                delay,
                tx,
                pending: None,
            },
            rx,
        )
    }

    /// Register a keystroke; cancels any timer still pending
    pub fn input(&mut self, value: T) {
        self.cancel();

        let token = CancellationToken::new();
        let timer = token.clone();
        let tx = self.tx.clone();
        let delay = self.delay;
        tokio::spawn(async move {
            tokio::select! {
                _ = timer.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    timer.cancel();
                    let _ = tx.send(value);
                }
            }
        });
        self.pending = Some(token);
    }

    /// Drop the pending value, if any
    pub fn cancel(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }

    /// Whether a value is waiting for its timer
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|t| !t.is_cancelled())
    }
}

impl<T> Drop for SearchDebouncer<T> {
    fn drop(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{Instant, sleep};

    #[tokio::test(start_paused = true)]
    async fn test_latest_keystroke_wins() {
        let (mut debouncer, mut rx) = SearchDebouncer::new(DEFAULT_SEARCH_DEBOUNCE);
        let start = Instant::now();

        debouncer.input("n".to_string());
        sleep(Duration::from_millis(100)).await;
        debouncer.input("no".to_string());
        sleep(Duration::from_millis(100)).await;
        debouncer.input("nor".to_string());
        assert!(debouncer.is_pending());

        assert_eq!(rx.recv().await.as_deref(), Some("nor"));
        assert!(start.elapsed() >= Duration::from_millis(500));
        assert!(!debouncer.is_pending());

        sleep(Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending_value() {
        let (mut debouncer, mut rx) = SearchDebouncer::new(DEFAULT_SEARCH_DEBOUNCE);
        debouncer.input("depot".to_string());
        debouncer.cancel();

        sleep(Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_quiet_inputs_each_settle() {
        let (mut debouncer, mut rx) = SearchDebouncer::new(Duration::from_millis(50));
        debouncer.input(1u32);
        assert_eq!(rx.recv().await, Some(1));
        debouncer.input(2u32);
        assert_eq!(rx.recv().await, Some(2));
    }
}
