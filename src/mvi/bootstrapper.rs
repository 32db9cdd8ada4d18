//! Bootstrapper: the initial action source of a store.

use std::future::Future;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::intent::Action;
use super::job::{spawn_scoped, CancelBarrier, Job};

/// Produces the actions a store starts with.
///
/// `invoke` is called exactly once, while the store is being built. It may
/// dispatch actions right away and launch long-lived subscriptions that keep
/// dispatching for the lifetime of the store.
pub trait Bootstrapper: Send + 'static {
    type Action: Action;

    fn invoke(&mut self, ctx: &BootstrapContext<Self::Action>);
}

pub(crate) type ActionSink<A> = Arc<dyn Fn(A) + Send + Sync>;

/// Dispatch handle given to a [`Bootstrapper`].
pub struct BootstrapContext<A: Action> {
    sink: ActionSink<A>,
    token: CancellationToken,
    barrier: Arc<dyn CancelBarrier>,
}

impl<A: Action> Clone for BootstrapContext<A> {
    fn clone(&self) -> Self {
        Self {
            sink: Arc::clone(&self.sink),
            token: self.token.clone(),
            barrier: Arc::clone(&self.barrier),
        }
    }
}

impl<A: Action> BootstrapContext<A> {
    pub(crate) fn new(
        sink: ActionSink<A>,
        token: CancellationToken,
        barrier: Arc<dyn CancelBarrier>,
    ) -> Self {
        Self {
            sink,
            token,
            barrier,
        }
    }

    /// Queue an action for the executor. Dropped once the store is disposed.
    pub fn dispatch(&self, action: A) {
        if self.token.is_cancelled() {
            return;
        }
        (self.sink)(action);
    }

    /// Start a task that lives until it finishes or the store is disposed.
    pub fn launch<F, Fut>(&self, task: F) -> Job
    where
        F: FnOnce(BootstrapContext<A>) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let token = self.token.child_token();
        let scoped = Self {
            sink: Arc::clone(&self.sink),
            token: token.clone(),
            barrier: Arc::clone(&self.barrier),
        };
        spawn_scoped(token, Arc::clone(&self.barrier), task(scoped))
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}
