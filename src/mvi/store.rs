//! Store: bootstrapper + executor + reducer behind one façade.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::reactive::{BehaviorSubject, Subscription, DEFAULT_BUFFER};

use super::bootstrapper::{ActionSink, BootstrapContext, Bootstrapper};
use super::executor::{Executor, ExecutorContext, MessageHook};
use super::job::CancelBarrier;
use super::message::Label;
use super::reducer::Reducer;

pub type StateOf<E> = <<E as Executor>::Reducer as Reducer>::State;
pub type MessageOf<E> = <<E as Executor>::Reducer as Reducer>::Message;

/// Shared part of a store, reachable from every context it hands out.
pub(crate) struct StoreCore<S, L> {
    pub(crate) id: Uuid,
    pub(crate) name: &'static str,
    pub(crate) state: BehaviorSubject<S>,
    pub(crate) labels: broadcast::Sender<L>,
    pub(crate) token: CancellationToken,
    disposed: AtomicBool,
}

impl<S, L> CancelBarrier for StoreCore<S, L>
where
    S: Clone + Send + 'static,
    L: Send + 'static,
{
    fn cancel(&self, token: &CancellationToken) {
        self.state.exclusive(|| token.cancel());
    }
}

enum Input<I, A> {
    Intent(I),
    Action(A),
}

type IntentSink<I> = Arc<dyn Fn(I) -> bool + Send + Sync>;

/// A running store bound to one screen instance.
///
/// Cloning yields another handle to the same store.
pub struct Store<I, S, L> {
    core: Arc<StoreCore<S, L>>,
    intents: IntentSink<I>,
}

impl<I, S, L> Clone for Store<I, S, L> {
    fn clone(&self) -> Self {
        Self {
            core: Arc::clone(&self.core),
            intents: Arc::clone(&self.intents),
        }
    }
}

impl<I, S, L> Store<I, S, L>
where
    I: Send + 'static,
    S: Clone + Send + 'static,
    L: Label,
{
    pub fn id(&self) -> Uuid {
        self.core.id
    }

    pub fn name(&self) -> &'static str {
        self.core.name
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> S {
        self.core.state.value()
    }

    /// Current state first, then every reduced state in order.
    pub fn states(&self) -> Subscription<S> {
        self.core.state.subscribe()
    }

    /// Labels published from now on. Past labels are never delivered.
    ///
    /// Each subscriber gets every label as long as it stays within the
    /// label buffer (`StoreBuilder::buffers`, `[store] label_buffer`). One
    /// that falls further behind skips the oldest labels, with a `warn!`.
    pub fn labels(&self) -> Subscription<L> {
        Subscription::live(self.core.labels.subscribe(), self.core.token.clone())
    }

    /// Queue an intent for the executor. Dropped silently once disposed.
    pub fn accept(&self, intent: I) {
        if self.core.token.is_cancelled() {
            tracing::trace!(store = self.core.name, "Intent dropped, store disposed");
            return;
        }
        if !(self.intents)(intent) {
            tracing::trace!(store = self.core.name, "Intent dropped, dispatch loop gone");
        }
    }

    /// Cancel all work owned by the store and stop accepting intents.
    ///
    /// Idempotent. Subscriptions end after draining what was already sent.
    pub fn dispose(&self) {
        if self.core.disposed.swap(true, Ordering::SeqCst) {
            return;
        }
        self.core.cancel(&self.core.token);
        self.core.state.close();
        tracing::debug!(store = self.core.name, id = %self.core.id, "Store disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.core.disposed.load(Ordering::SeqCst)
    }

    /// True when both handles point at the same store.
    pub fn same_store(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.core, &other.core)
    }
}

/// Builder composing the parts of a store.
///
/// ```ignore
/// let store = StoreBuilder::new("SearchStore", initial, SearchExecutor::new(..))
///     .bootstrapper(SearchBootstrapper)
///     .build();
/// ```
pub struct StoreBuilder<E: Executor> {
    name: &'static str,
    initial_state: StateOf<E>,
    executor: E,
    bootstrapper: Option<Box<dyn Bootstrapper<Action = E::Action>>>,
    hook: Option<MessageHook<MessageOf<E>>>,
    state_buffer: usize,
    label_buffer: usize,
}

impl<E: Executor> StoreBuilder<E> {
    pub fn new(name: &'static str, initial_state: StateOf<E>, executor: E) -> Self {
        Self {
            name,
            initial_state,
            executor,
            bootstrapper: None,
            hook: None,
            state_buffer: DEFAULT_BUFFER,
            label_buffer: DEFAULT_BUFFER,
        }
    }

    pub fn bootstrapper<B>(mut self, bootstrapper: B) -> Self
    where
        B: Bootstrapper<Action = E::Action>,
    {
        self.bootstrapper = Some(Box::new(bootstrapper));
        self
    }

    /// Observe every message in fold order.
    pub fn on_message(mut self, hook: MessageHook<MessageOf<E>>) -> Self {
        self.hook = Some(hook);
        self
    }

    pub fn buffers(mut self, state_buffer: usize, label_buffer: usize) -> Self {
        self.state_buffer = state_buffer;
        self.label_buffer = label_buffer;
        self
    }

    /// Start the store. Must be called from within a Tokio runtime.
    pub fn build(self) -> Store<E::Intent, StateOf<E>, E::Label> {
        let (labels, _) = broadcast::channel(self.label_buffer.max(1));
        let core = Arc::new(StoreCore {
            id: Uuid::new_v4(),
            name: self.name,
            state: BehaviorSubject::with_buffer(self.initial_state, self.state_buffer),
            labels,
            token: CancellationToken::new(),
            disposed: AtomicBool::new(false),
        });

        let (sender, receiver) = mpsc::unbounded_channel::<Input<E::Intent, E::Action>>();

        let intent_sender = sender.clone();
        let intents: IntentSink<E::Intent> =
            Arc::new(move |intent: E::Intent| intent_sender.send(Input::Intent(intent)).is_ok());
        let actions: ActionSink<E::Action> = Arc::new(move |action: E::Action| {
            let _ = sender.send(Input::Action(action));
        });

        let ctx = ExecutorContext::new(Arc::clone(&core), self.hook, core.token.clone());
        tokio::spawn(run_dispatch_loop(self.executor, receiver, ctx, core.token.clone()));

        if let Some(mut bootstrapper) = self.bootstrapper {
            let barrier: Arc<dyn CancelBarrier> = core.clone();
            let bootstrap = BootstrapContext::new(actions, core.token.clone(), barrier);
            bootstrapper.invoke(&bootstrap);
        }

        tracing::debug!(store = core.name, id = %core.id, "Store created");
        Store { core, intents }
    }
}

async fn run_dispatch_loop<E: Executor>(
    mut executor: E,
    mut inputs: mpsc::UnboundedReceiver<Input<E::Intent, E::Action>>,
    ctx: ExecutorContext<E::Reducer, E::Label>,
    token: CancellationToken,
) {
    loop {
        let input = tokio::select! {
            biased;
            _ = token.cancelled() => break,
            input = inputs.recv() => match input {
                Some(input) => input,
                None => break,
            },
        };
        match input {
            Input::Intent(intent) => executor.execute_intent(intent, &ctx),
            Input::Action(action) => executor.execute_action(action, &ctx),
        }
    }
    executor.dispose();
}
