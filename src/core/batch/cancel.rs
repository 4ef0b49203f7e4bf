//! Cooperative cancellation
//!
//! A [`CancellationSignal`] is a read-only view of a `watch` channel that the
//! binary flips on Ctrl+C or SIGTERM. Work checks it at item and step
//! boundaries; nothing is interrupted mid-transform.

use tokio::sync::watch;

/// Read side of a cancellation request
#[derive(Debug, Clone)]
pub struct CancellationSignal {
    rx: Option<watch::Receiver<bool>>,
}

impl CancellationSignal {
    pub fn new(rx: watch::Receiver<bool>) -> Self {
        Self { rx: Some(rx) }
    }

    /// A signal that is never raised
    pub fn never() -> Self {
        Self { rx: None }
    }

    /// Create a sender and its signal; sending `true` requests cancellation
    pub fn channel() -> (watch::Sender<bool>, Self) {
        let (tx, rx) = watch::channel(false);
        (tx, Self::new(rx))
    }

    pub fn is_canceled(&self) -> bool {
        self.rx.as_ref().is_some_and(|rx| *rx.borrow())
    }
}

impl Default for CancellationSignal {
    fn default() -> Self {
        Self::never()
    }
}

impl From<watch::Receiver<bool>> for CancellationSignal {
    fn from(rx: watch::Receiver<bool>) -> Self {
        Self::new(rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_is_not_canceled() {
        let signal = CancellationSignal::never();
        assert!(!signal.is_canceled());
    }

    #[test]
    fn test_channel_cancels() {
        let (tx, signal) = CancellationSignal::channel();
        assert!(!signal.is_canceled());

        tx.send(true).unwrap();
        assert!(signal.is_canceled());
    }

    #[test]
    fn test_clones_observe_the_same_request() {
        let (tx, signal) = CancellationSignal::channel();
        let clone = signal.clone();
        tx.send(true).unwrap();
        assert!(clone.is_canceled());
    }
}
