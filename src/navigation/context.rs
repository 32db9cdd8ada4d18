//! Per-child context handed out by the back stack.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::registry::{InstanceKey, RegistryError, Released, Retained, StoreRegistry};

/// Lifecycle and retention scope of one child component.
///
/// The lifecycle token ends when the component is torn down, either because
/// the screen left the stack or because its UI is being rebuilt. The store
/// slot (`key` in the registry) only goes away in the first case.
#[derive(Clone)]
pub struct ComponentContext {
    key: InstanceKey,
    registry: StoreRegistry,
    lifecycle: CancellationToken,
}

impl ComponentContext {
    pub fn new(key: InstanceKey, registry: StoreRegistry) -> Self {
        Self {
            key,
            registry,
            lifecycle: CancellationToken::new(),
        }
    }

    pub fn key(&self) -> &InstanceKey {
        &self.key
    }

    /// The store retained for this screen instance, created on first use.
    pub fn retained_store<T, F>(&self, factory: F) -> Result<T, RegistryError>
    where
        T: Retained + Clone,
        F: FnOnce() -> T,
    {
        self.registry.get_or_create(&self.key, factory)
    }

    /// Run `task` until it completes or the component is torn down.
    pub fn launch<Fut>(&self, task: Fut)
    where
        Fut: Future<Output = ()> + Send + 'static,
    {
        let lifecycle = self.lifecycle.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = lifecycle.cancelled() => {}
                _ = task => {}
            }
        });
    }

    pub fn is_destroyed(&self) -> bool {
        self.lifecycle.is_cancelled()
    }

    /// Same instance, fresh lifecycle: used when only the UI is rebuilt.
    pub(crate) fn rebuild(&self) -> Self {
        Self::new(self.key.clone(), self.registry.clone())
    }

    /// Tear down the component but keep its store.
    pub(crate) fn destroy_view(&self) {
        self.lifecycle.cancel();
    }

    /// Tear down the component and release its store.
    pub(crate) fn destroy(&self) {
        if let Some(released) = self.release() {
            released.dispose();
        }
    }

    /// Tear down the component and unbind its store from the key. The store
    /// is disposed by the caller, typically once the stack lock is dropped.
    pub(crate) fn release(&self) -> Option<Released> {
        self.lifecycle.cancel();
        self.registry.take(&self.key)
    }
}
