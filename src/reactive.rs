//! Replay-1 value streams.
//!
//! A [`BehaviorSubject`] holds the latest value and fans every update out
//! to its subscribers. A new [`Subscription`] first yields the value that
//! was current when it subscribed, then every later update in order.
//!
//! Store state and the favourites change stream are both built on this.

use futures::stream::{self, BoxStream, StreamExt};
use parking_lot::Mutex;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::CancellationToken;

/// Default fan-out buffer per subject.
pub const DEFAULT_BUFFER: usize = 64;

/// Latest-value holder with ordered fan-out.
///
/// `set` and `subscribe` take the same lock, so a subscriber never misses
/// an update that happened after its initial value, and never sees one twice.
pub struct BehaviorSubject<T> {
    value: Mutex<T>,
    sender: broadcast::Sender<T>,
    closed: CancellationToken,
}

impl<T: Clone + Send + 'static> BehaviorSubject<T> {
    pub fn new(initial: T) -> Self {
        Self::with_buffer(initial, DEFAULT_BUFFER)
    }

    pub fn with_buffer(initial: T, buffer: usize) -> Self {
        let (sender, _) = broadcast::channel(buffer.max(1));
        Self {
            value: Mutex::new(initial),
            sender,
            closed: CancellationToken::new(),
        }
    }

    /// Current value.
    pub fn value(&self) -> T {
        self.value.lock().clone()
    }

    /// Replace the value and notify subscribers.
    pub fn set(&self, value: T) {
        let mut guard = self.value.lock();
        *guard = value.clone();
        // No receivers is fine: late subscribers read the stored value.
        let _ = self.sender.send(value);
    }

    /// Apply `f` to the current value under the lock. Publishes and returns
    /// the new value when `f` produces one; `None` leaves the value untouched.
    pub fn try_update<F>(&self, f: F) -> Option<T>
    where
        F: FnOnce(&T) -> Option<T>,
    {
        let mut guard = self.value.lock();
        let next = f(&guard)?;
        *guard = next.clone();
        let _ = self.sender.send(next.clone());
        Some(next)
    }

    /// Run `f` while holding the update lock, ordering it against every
    /// `set`/`try_update`.
    pub(crate) fn exclusive<R>(&self, f: impl FnOnce() -> R) -> R {
        let _guard = self.value.lock();
        f()
    }

    pub fn subscribe(&self) -> Subscription<T> {
        let guard = self.value.lock();
        Subscription {
            pending: Some(guard.clone()),
            receiver: self.sender.subscribe(),
            closed: self.closed.clone(),
        }
    }

    /// Ends every subscription once it has drained buffered updates.
    pub fn close(&self) {
        self.closed.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.closed.is_cancelled()
    }
}

/// Receiving side of a [`BehaviorSubject`] or a label stream.
pub struct Subscription<T> {
    pending: Option<T>,
    receiver: broadcast::Receiver<T>,
    closed: CancellationToken,
}

impl<T: Clone + Send + 'static> Subscription<T> {
    /// Subscription with no initial value: only updates sent after this call.
    pub(crate) fn live(receiver: broadcast::Receiver<T>, closed: CancellationToken) -> Self {
        Self {
            pending: None,
            receiver,
            closed,
        }
    }

    /// Next value, or `None` once the source is closed and drained.
    pub async fn recv(&mut self) -> Option<T> {
        if let Some(value) = self.pending.take() {
            return Some(value);
        }
        loop {
            tokio::select! {
                biased;
                received = self.receiver.recv() => match received {
                    Ok(value) => return Some(value),
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Subscriber lagged behind, updates dropped");
                    }
                    Err(RecvError::Closed) => return None,
                },
                _ = self.closed.cancelled() => return None,
            }
        }
    }

    /// Non-blocking poll: next value that is already available.
    pub fn try_recv(&mut self) -> Option<T> {
        if let Some(value) = self.pending.take() {
            return Some(value);
        }
        loop {
            match self.receiver.try_recv() {
                Ok(value) => return Some(value),
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Subscriber lagged behind, updates dropped");
                }
                Err(_) => return None,
            }
        }
    }

    pub fn into_stream(self) -> BoxStream<'static, T> {
        stream::unfold(self, |mut subscription| async move {
            subscription.recv().await.map(|value| (value, subscription))
        })
        .boxed()
    }
}
