use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;

/// Coalesces rapid text-input changes into one delayed emission.
///
/// Each `input` restarts the timer; only the value that survives a full
/// quiet window reaches the receiver. Used for free-text search fields so a
/// burst of keystrokes costs one request, not one per character.
pub struct Debouncer {
    delay: Duration,
    tx: mpsc::UnboundedSender<String>,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    /// The receiver yields the settled values, in order.
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<String>) {
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

    pub fn input(&mut self, value: impl Into<String>) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        let tx = self.tx.clone();
        let delay = self.delay;
        let value = value.into();
        self.pending = Some(tokio::spawn(async move {
            sleep(delay).await;
            let _ = tx.send(value);
        }));
    }

    /// Drop any value still waiting out its quiet window.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        // A timer must never fire after its consumer is gone.
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn burst_yields_one_emission_with_final_value() {
        let (mut debouncer, mut rx) = Debouncer::new(Duration::from_millis(300));

        debouncer.input("a");
        debouncer.input("ap");
        debouncer.input("app");
        debouncer.input("appl");
        debouncer.input("apple");

        assert_eq!(rx.recv().await.as_deref(), Some("apple"));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn settled_values_arrive_in_order() {
        let (mut debouncer, mut rx) = Debouncer::new(Duration::from_millis(300));

        debouncer.input("first");
        assert_eq!(rx.recv().await.as_deref(), Some("first"));

        debouncer.input("second");
        assert_eq!(rx.recv().await.as_deref(), Some("second"));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_pending_timer() {
        let (mut debouncer, mut rx) = Debouncer::new(Duration::from_millis(300));
        debouncer.input("never");
        drop(debouncer);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(rx.try_recv().is_err());
    }
}
