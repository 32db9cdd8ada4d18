use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tokio::sync::watch;

use crate::registry::{InstanceKey, StoreRegistry};

use super::context::ComponentContext;
use super::{NavConfig, NavigationError};

/// Builds the child component for a config.
pub type ChildFactory<C, T> = Box<
    dyn Fn(&C, ComponentContext, StackNavigation<C>) -> Result<T, NavigationError> + Send + Sync,
>;

/// What the rendering layer sees: the configs on the stack, top last.
#[derive(Debug, Clone, PartialEq)]
pub struct StackSnapshot<C> {
    pub configs: Vec<C>,
}

impl<C> StackSnapshot<C> {
    pub fn active(&self) -> Option<&C> {
        self.configs.last()
    }

    pub fn depth(&self) -> usize {
        self.configs.len()
    }
}

struct StackEntry<C, T> {
    config: C,
    context: ComponentContext,
    child: T,
}

trait Navigator<C>: Send + Sync {
    fn push(&self, config: C) -> Result<(), NavigationError>;
    fn pop(&self) -> bool;
}

/// Cloneable handle children use to navigate. Does not keep the stack alive.
pub struct StackNavigation<C> {
    target: Weak<dyn Navigator<C>>,
}

impl<C> Clone for StackNavigation<C> {
    fn clone(&self) -> Self {
        Self {
            target: Weak::clone(&self.target),
        }
    }
}

impl<C> StackNavigation<C> {
    pub fn push(&self, config: C) -> Result<(), NavigationError> {
        let target = self.target.upgrade().ok_or(NavigationError::Detached)?;
        target.push(config)
    }

    /// Pop the top screen. Returns `false` at the root or once the stack is gone.
    pub fn pop(&self) -> bool {
        self.target.upgrade().is_some_and(|target| target.pop())
    }
}

struct StackInner<C, T> {
    entries: Mutex<Vec<StackEntry<C, T>>>,
    factory: ChildFactory<C, T>,
    registry: StoreRegistry,
    snapshot: watch::Sender<StackSnapshot<C>>,
    this: Weak<StackInner<C, T>>,
}

impl<C, T> StackInner<C, T>
where
    C: NavConfig,
    T: Send + 'static,
{
    fn navigation(&self) -> StackNavigation<C> {
        let target: Weak<dyn Navigator<C>> = self.this.clone();
        StackNavigation { target }
    }

    fn create_entry(&self, config: C, position: usize) -> Result<StackEntry<C, T>, NavigationError> {
        let key = InstanceKey::for_child(&config.key(), position);
        let context = ComponentContext::new(key, self.registry.clone());
        match (self.factory)(&config, context.clone(), self.navigation()) {
            Ok(child) => Ok(StackEntry {
                config,
                context,
                child,
            }),
            Err(err) => {
                context.destroy();
                Err(err)
            }
        }
    }

    fn publish(&self, entries: &[StackEntry<C, T>]) {
        let configs = entries.iter().map(|entry| entry.config.clone()).collect();
        self.snapshot.send_replace(StackSnapshot { configs });
    }

    fn destroy_all(&self) {
        let released: Vec<_> = self
            .entries
            .lock()
            .drain(..)
            .rev()
            .filter_map(|entry| entry.context.release())
            .collect();
        for store in released {
            store.dispose();
        }
    }
}

impl<C, T> Navigator<C> for StackInner<C, T>
where
    C: NavConfig,
    T: Send + 'static,
{
    fn push(&self, config: C) -> Result<(), NavigationError> {
        let mut entries = self.entries.lock();
        let entry = self.create_entry(config, entries.len())?;
        tracing::debug!(config = ?entry.config, depth = entries.len() + 1, "Navigation push");
        entries.push(entry);
        self.publish(&entries);
        Ok(())
    }

    fn pop(&self) -> bool {
        // The key is unbound under the stack lock so that a push racing in
        // right after can't pick up the store about to be disposed.
        let released = {
            let mut entries = self.entries.lock();
            if entries.len() <= 1 {
                tracing::debug!("Navigation pop ignored at root");
                return false;
            }
            let Some(entry) = entries.pop() else {
                return false;
            };
            tracing::debug!(config = ?entry.config, "Navigation pop");
            let released = entry.context.release();
            self.publish(&entries);
            released
        };
        if let Some(store) = released {
            store.dispose();
        }
        true
    }
}

/// Never-empty stack of configs bound to live child components.
///
/// Dropping the stack destroys every child and disposes their stores.
pub struct ChildStack<C: NavConfig, T: Send + 'static> {
    inner: Arc<StackInner<C, T>>,
}

impl<C, T> ChildStack<C, T>
where
    C: NavConfig,
    T: Clone + Send + 'static,
{
    /// Stack with a single root config.
    pub fn new(
        initial: C,
        registry: StoreRegistry,
        factory: ChildFactory<C, T>,
    ) -> Result<Self, NavigationError> {
        Self::with_configs(vec![initial], registry, factory)
    }

    /// Rebuild a stack from configs produced by [`ChildStack::save`].
    pub fn restore(
        saved: &str,
        registry: StoreRegistry,
        factory: ChildFactory<C, T>,
    ) -> Result<Self, NavigationError> {
        let configs: Vec<C> = serde_json::from_str(saved)?;
        Self::with_configs(configs, registry, factory)
    }

    fn with_configs(
        configs: Vec<C>,
        registry: StoreRegistry,
        factory: ChildFactory<C, T>,
    ) -> Result<Self, NavigationError> {
        if configs.is_empty() {
            return Err(NavigationError::EmptyStack);
        }
        let (snapshot, _) = watch::channel(StackSnapshot {
            configs: configs.clone(),
        });
        let inner = Arc::new_cyclic(|this| StackInner {
            entries: Mutex::new(Vec::with_capacity(configs.len())),
            factory,
            registry,
            snapshot,
            this: this.clone(),
        });
        let stack = Self { inner };
        {
            let mut entries = stack.inner.entries.lock();
            for (position, config) in configs.into_iter().enumerate() {
                let entry = stack.inner.create_entry(config, position)?;
                entries.push(entry);
            }
        }
        Ok(stack)
    }

    /// Append `config`; its child becomes active.
    pub fn push(&self, config: C) -> Result<(), NavigationError> {
        Navigator::push(self.inner.as_ref(), config)
    }

    /// Remove the top child and release its store. No-op at the root.
    pub fn pop(&self) -> bool {
        Navigator::pop(self.inner.as_ref())
    }

    /// Back press/gesture. Returns `true` when consumed; `false` means the
    /// host should handle it (e.g. exit).
    pub fn handle_back(&self) -> bool {
        self.pop()
    }

    /// The active (top) child.
    pub fn current(&self) -> T {
        self.inner
            .entries
            .lock()
            .last()
            .map(|entry| entry.child.clone())
            .expect("back stack is never empty")
    }

    pub fn active_config(&self) -> C {
        self.inner
            .entries
            .lock()
            .last()
            .map(|entry| entry.config.clone())
            .expect("back stack is never empty")
    }

    pub fn configs(&self) -> Vec<C> {
        self.inner
            .entries
            .lock()
            .iter()
            .map(|entry| entry.config.clone())
            .collect()
    }

    pub fn depth(&self) -> usize {
        self.inner.entries.lock().len()
    }

    pub fn subscribe(&self) -> watch::Receiver<StackSnapshot<C>> {
        self.inner.snapshot.subscribe()
    }

    pub fn navigation(&self) -> StackNavigation<C> {
        self.inner.navigation()
    }

    /// Tear down and rebuild every child component, keeping their stores.
    pub fn recreate_children(&self) -> Result<(), NavigationError> {
        let mut entries = self.inner.entries.lock();
        for entry in entries.iter_mut() {
            entry.context.destroy_view();
            let context = entry.context.rebuild();
            entry.child = (self.inner.factory)(&entry.config, context.clone(), self.inner.navigation())?;
            entry.context = context;
        }
        tracing::debug!(depth = entries.len(), "Children recreated");
        Ok(())
    }

    /// Serialize the configs so the stack can be restored later.
    pub fn save(&self) -> Result<String, NavigationError> {
        Ok(serde_json::to_string(&self.configs())?)
    }

    /// Destroy every child and dispose their stores.
    pub fn destroy(self) {
        drop(self);
    }
}

impl<C: NavConfig, T: Send + 'static> Drop for ChildStack<C, T> {
    fn drop(&mut self) {
        self.inner.destroy_all();
    }
}
