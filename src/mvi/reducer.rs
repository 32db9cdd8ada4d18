//! Reducer trait for MVI architecture.

use super::message::Message;
use super::state::UiState;

/// Reducer folds messages into state.
///
/// The reducer is the only place where state transitions happen.
/// It must be a total, pure function: (State, Message) -> State
pub trait Reducer: Send + 'static {
    /// The state type this reducer operates on.
    type State: UiState;

    /// The message type this reducer handles.
    type Message: Message;

    /// Process a message and return the new state.
    ///
    /// This should be a pure function with no side effects.
    fn reduce(state: Self::State, message: Self::Message) -> Self::State;

    /// Fold a message history from `initial`.
    fn replay<I>(initial: Self::State, messages: I) -> Self::State
    where
        I: IntoIterator<Item = Self::Message>,
    {
        messages.into_iter().fold(initial, Self::reduce)
    }
}
