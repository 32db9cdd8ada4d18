//! Back-stack navigation.
//!
//! A [`ChildStack`] holds an ordered, never-empty list of screen configs,
//! each bound to a live child component. Children navigate through a
//! [`StackNavigation`] handle; the rendering layer watches
//! [`ChildStack::subscribe`].

mod context;
mod stack;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::registry::RegistryError;

pub use context::ComponentContext;
pub use stack::{ChildFactory, ChildStack, StackNavigation, StackSnapshot};

/// Serializable identity of a screen plus its construction parameters.
pub trait NavConfig:
    Clone + std::fmt::Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Identity that, with the stack position, keys the child's store.
    fn key(&self) -> String;
}

#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("Failed to create child: {0}")]
    Registry(#[from] RegistryError),

    #[error("Failed to (de)serialize back stack: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Back stack must contain at least one configuration")]
    EmptyStack,

    #[error("Navigation target no longer exists")]
    Detached,
}
