//! Keyed retention of live stores.
//!
//! A screen instance looks its store up by [`InstanceKey`]. Rebuilding the
//! screen's component (without destroying the logical screen) gets the same
//! store back; destroying the screen removes the entry and disposes it.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;

use crate::mvi::{Label, Store};

/// Something the registry can release when its screen goes away.
pub trait Retained: Any + Send + Sync {
    fn dispose(&self);
}

impl<I, S, L> Retained for Store<I, S, L>
where
    I: Send + 'static,
    S: Clone + Send + 'static,
    L: Label,
{
    fn dispose(&self) {
        Store::dispose(self);
    }
}

/// Stable identity of one logical screen instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InstanceKey(String);

impl InstanceKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Key for the child at `position` in a back stack, built from its config.
    pub fn for_child(config_key: &str, position: usize) -> Self {
        Self(format!("{config_key}@{position}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstanceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Error)]
pub enum RegistryError {
    /// The key is already bound to an instance of another type.
    #[error("Instance '{key}' is registered with a different type (expected {expected})")]
    TypeMismatch { key: InstanceKey, expected: &'static str },
}

/// An instance already unbound from its key, waiting to be disposed.
#[must_use = "the released instance must be disposed"]
pub struct Released {
    key: InstanceKey,
    handle: Box<dyn Retained>,
}

impl Released {
    pub fn key(&self) -> &InstanceKey {
        &self.key
    }

    pub fn dispose(self) {
        self.handle.dispose();
        tracing::debug!(key = %self.key, "Instance removed");
    }
}

struct Entry {
    instance: Box<dyn Any + Send + Sync>,
    handle: Box<dyn Retained>,
}

/// Map from screen-instance key to its live store.
#[derive(Clone, Default)]
pub struct StoreRegistry {
    entries: Arc<Mutex<HashMap<InstanceKey, Entry>>>,
}

impl StoreRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the instance registered under `key`, creating it with `factory`
    /// if there is none. At most one instance per key is ever live.
    pub fn get_or_create<T, F>(&self, key: &InstanceKey, factory: F) -> Result<T, RegistryError>
    where
        T: Retained + Clone,
        F: FnOnce() -> T,
    {
        let mut entries = self.entries.lock();
        if let Some(existing) = entries.get(key) {
            return existing
                .instance
                .downcast_ref::<T>()
                .cloned()
                .ok_or_else(|| RegistryError::TypeMismatch {
                    key: key.clone(),
                    expected: std::any::type_name::<T>(),
                });
        }

        let instance = factory();
        entries.insert(
            key.clone(),
            Entry {
                instance: Box::new(instance.clone()),
                handle: Box::new(instance.clone()),
            },
        );
        tracing::debug!(key = %key, "Instance registered");
        Ok(instance)
    }

    /// Remove and dispose the instance under `key`. Returns whether one existed.
    pub fn remove(&self, key: &InstanceKey) -> bool {
        match self.take(key) {
            Some(released) => {
                released.dispose();
                true
            }
            None => false,
        }
    }

    /// Unbind the instance under `key` without disposing it yet.
    ///
    /// From this call on, `get_or_create` with the same key builds a fresh
    /// instance; the caller disposes the old one through [`Released`].
    pub fn take(&self, key: &InstanceKey) -> Option<Released> {
        let entry = self.entries.lock().remove(key)?;
        Some(Released {
            key: key.clone(),
            handle: entry.handle,
        })
    }

    pub fn contains(&self, key: &InstanceKey) -> bool {
        self.entries.lock().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Dispose every registered instance.
    pub fn clear(&self) {
        let drained: Vec<_> = self.entries.lock().drain().collect();
        for (key, entry) in drained {
            entry.handle.dispose();
            tracing::debug!(key = %key, "Instance removed");
        }
    }
}
