//! Cancellable effects launched inside a store scope.

use std::future::Future;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Orders a cancellation against the owning store's reductions.
///
/// Once `cancel` returns, no reduction can observe the token as live.
pub(crate) trait CancelBarrier: Send + Sync {
    fn cancel(&self, token: &CancellationToken);
}

/// Handle to an effect started with `launch`.
///
/// Dropping the handle does not cancel the effect; it keeps running until
/// it completes, [`Job::cancel`] is called, or the store is disposed.
pub struct Job {
    token: CancellationToken,
    handle: JoinHandle<()>,
    barrier: Arc<dyn CancelBarrier>,
}

impl Job {
    /// Cancel the effect. No message from it is applied after this returns.
    pub fn cancel(&self) {
        self.barrier.cancel(&self.token);
        self.handle.abort();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// True while the effect neither finished nor got cancelled.
    pub fn is_active(&self) -> bool {
        !self.token.is_cancelled() && !self.handle.is_finished()
    }
}

impl std::fmt::Debug for Job {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Job")
            .field("cancelled", &self.is_cancelled())
            .field("finished", &self.handle.is_finished())
            .finish()
    }
}

/// Spawn `effect` so that it stops at its next suspension point once
/// `token` is cancelled.
pub(crate) fn spawn_scoped<Fut>(
    token: CancellationToken,
    barrier: Arc<dyn CancelBarrier>,
    effect: Fut,
) -> Job
where
    Fut: Future<Output = ()> + Send + 'static,
{
    let guard = token.clone();
    let handle = tokio::spawn(async move {
        tokio::select! {
            biased;
            _ = guard.cancelled() => {}
            _ = effect => {}
        }
    });
    Job {
        token,
        handle,
        barrier,
    }
}
