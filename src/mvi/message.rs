//! Outputs of an executor: messages for the reducer, labels for the owner.

use std::fmt::Debug;

/// Description of a state delta. Consumed only by the reducer.
pub trait Message: Debug + Send + 'static {}

/// One-shot notification published to the store's owner.
///
/// Labels carry no state change and are never replayed to late subscribers.
pub trait Label: Clone + Debug + Send + 'static {}
