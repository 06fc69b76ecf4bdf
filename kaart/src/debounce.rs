use std::time::Duration;

use tokio::{
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    time::{sleep_until, Instant},
};

/// Creates a debounced channel: bursts sent on the sender come out of the
/// [`Debouncer`] as their last value, once `delay` passed without a new one.
pub fn debounce<T>(delay: Duration) -> (UnboundedSender<T>, Debouncer<T>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (
        tx,
        Debouncer {
            rx,
            delay,
            pending: None,
            deadline: Instant::now(),
        },
    )
}

#[derive(Debug)]
pub struct Debouncer<T> {
    rx: UnboundedReceiver<T>,
    delay: Duration,
    pending: Option<T>,
    deadline: Instant,
}

impl<T> Debouncer<T> {
    /// Waits for the next burst to settle.
    ///
    /// Returns `None` once all senders are gone and nothing is pending.
    /// Cancel safe: a pending value survives being dropped out of a `select!`.
    pub async fn next(&mut self) -> Option<T> {
        loop {
            if self.pending.is_none() {
                let value = self.rx.recv().await?;
                self.pending = Some(value);
                self.deadline = Instant::now() + self.delay;
            }

            tokio::select! {
                biased;
                value = self.rx.recv() => match value {
                    Some(value) => {
                        self.pending = Some(value);
                        self.deadline = Instant::now() + self.delay;
                    }
                    None => return self.pending.take(),
                },
                _ = sleep_until(self.deadline) => return self.pending.take(),
            }
        }
    }
}
