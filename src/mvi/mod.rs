//! Model-View-Intent (MVI) store engine.
//!
//! This module provides the building blocks for unidirectional data flow
//! on every screen.
//!
//! # Architecture
//!
//! ```text
//!             Bootstrapper ──Action──┐
//!                                    ▼
//! Intent ──→ Store ──────────→ Executor ──Message──→ Reducer ──→ State ──→ View
//!                                    │                                      │
//!                                    └──Label──→ Owner (navigation)         │
//!    ↑                                                                      │
//!    └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **State**: Immutable representation of screen state
//! - **Intent**: User actions; **Action**: bootstrap/internal events
//! - **Executor**: Maps intents/actions to messages, labels and effects
//! - **Message**: State delta, consumed only by the reducer
//! - **Reducer**: Pure function that folds messages into state
//! - **Label**: One-shot event for the store's owner, never replayed

mod bootstrapper;
mod executor;
mod intent;
mod job;
mod message;
mod reducer;
mod state;
mod store;

pub use bootstrapper::{BootstrapContext, Bootstrapper};
pub use executor::{Executor, ExecutorContext, MessageHook};
pub use intent::{Action, Intent};
pub use job::Job;
pub use message::{Label, Message};
pub use reducer::Reducer;
pub use state::UiState;
pub use store::{MessageOf, StateOf, Store, StoreBuilder};
