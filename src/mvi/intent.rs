//! Base traits for the inputs of a store: intents and actions.

/// Marker trait for intent objects.
///
/// Intents represent user actions for one screen:
/// - Text changes, button clicks
/// - Item selection
/// - Navigation requests (back)
///
/// Intents are handed to the executor in the order they were accepted.
pub trait Intent: Send + 'static {}

/// Marker trait for internally-triggered events.
///
/// Actions come from the bootstrapper (e.g. "start loading", one per update
/// of a subscribed stream) and never leave the store.
pub trait Action: Send + 'static {}
