//! City search screen.
//!
//! Opened either to look a city up (tapping a result opens its forecast) or
//! to pick a city to add to favourites (tapping a result saves it and
//! closes the screen).
//!
//! - `intent.rs` - Intents, actions and labels
//! - `state.rs` - Query and search phase
//! - `reducer.rs` - Messages and state transitions
//! - `executor.rs` - Search and save effects
//! - `store.rs` - Store factory
//! - `component.rs` - Component binding the store to navigation

mod component;
mod executor;
mod intent;
mod reducer;
mod state;
mod store;

pub use component::SearchComponent;
pub use executor::SearchExecutor;
pub use intent::{OpenReason, SearchAction, SearchIntent, SearchLabel};
pub use reducer::{SearchMsg, SearchReducer};
pub use state::{SearchPhase, SearchState};
pub use store::{SearchStore, SearchStoreFactory};
