//! Executor: turns intents and actions into messages and labels.

use std::future::Future;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::intent::{Action, Intent};
use super::job::{spawn_scoped, CancelBarrier, Job};
use super::message::Label;
use super::reducer::Reducer;
use super::store::StoreCore;

/// Observer called with every message, in fold order, before it is reduced.
pub type MessageHook<M> = Arc<dyn Fn(&M) + Send + Sync>;

/// Dispatch table from intents/actions to messages, labels and effects.
///
/// Both methods run on the store's dispatch task, one input at a time, in
/// arrival order. They must not block; long work goes through
/// [`ExecutorContext::launch`].
pub trait Executor: Send + 'static {
    type Intent: Intent;
    type Action: Action;
    type Reducer: Reducer;
    type Label: Label;

    fn execute_intent(
        &mut self,
        intent: Self::Intent,
        ctx: &ExecutorContext<Self::Reducer, Self::Label>,
    );

    fn execute_action(
        &mut self,
        action: Self::Action,
        ctx: &ExecutorContext<Self::Reducer, Self::Label>,
    );

    /// Called once when the store is disposed.
    fn dispose(&mut self) {}
}

/// Capabilities an executor (or one of its effects) has over its store.
///
/// Each launched effect gets its own context bound to the effect's
/// cancellation token: once the effect is cancelled, `dispatch` and
/// `publish` on that context become no-ops.
pub struct ExecutorContext<R: Reducer, L: Label> {
    core: Arc<StoreCore<R::State, L>>,
    hook: Option<MessageHook<R::Message>>,
    token: CancellationToken,
}

impl<R: Reducer, L: Label> Clone for ExecutorContext<R, L> {
    fn clone(&self) -> Self {
        Self {
            core: Arc::clone(&self.core),
            hook: self.hook.clone(),
            token: self.token.clone(),
        }
    }
}

impl<R: Reducer, L: Label> ExecutorContext<R, L> {
    pub(crate) fn new(
        core: Arc<StoreCore<R::State, L>>,
        hook: Option<MessageHook<R::Message>>,
        token: CancellationToken,
    ) -> Self {
        Self { core, hook, token }
    }

    /// Current state, read at the moment of the call.
    pub fn state(&self) -> R::State {
        self.core.state.value()
    }

    /// Reduce `message` into the store state and publish the result.
    ///
    /// Reductions are serialized: each one sees the result of the previous.
    pub fn dispatch(&self, message: R::Message) {
        let token = &self.token;
        let hook = self.hook.as_ref();
        let name = self.core.name;
        let applied = self.core.state.try_update(|state| {
            if token.is_cancelled() {
                return None;
            }
            tracing::trace!(store = name, ?message, "Reducing message");
            if let Some(hook) = hook {
                hook(&message);
            }
            Some(R::reduce(state.clone(), message))
        });
        if applied.is_none() {
            tracing::trace!(store = name, "Message dropped after cancellation");
        }
    }

    /// Publish a one-shot label to current label subscribers.
    pub fn publish(&self, label: L) {
        if self.token.is_cancelled() {
            return;
        }
        tracing::trace!(store = self.core.name, ?label, "Publishing label");
        // Nobody listening is not an error: labels are not retained.
        let _ = self.core.labels.send(label);
    }

    /// Start an asynchronous effect scoped to this context.
    ///
    /// The effect receives its own context; cancelling the returned [`Job`]
    /// or disposing the store stops it and discards anything it would
    /// dispatch afterwards.
    pub fn launch<F, Fut>(&self, effect: F) -> Job
    where
        F: FnOnce(ExecutorContext<R, L>) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let token = self.token.child_token();
        let scoped = Self {
            core: Arc::clone(&self.core),
            hook: self.hook.clone(),
            token: token.clone(),
        };
        let barrier: Arc<dyn CancelBarrier> = self.core.clone();
        spawn_scoped(token, barrier, effect(scoped))
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}
