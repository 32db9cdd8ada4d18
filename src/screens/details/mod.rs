//! Forecast screen for one city, with a favourite toggle.
//!
//! The bootstrapper starts the forecast load and follows the city's
//! favourite status for the lifetime of the store, so a change made from
//! another screen shows up here without any message between stores.

mod bootstrapper;
mod component;
mod executor;
mod intent;
mod reducer;
mod state;
mod store;

pub use bootstrapper::DetailsBootstrapper;
pub use component::DetailsComponent;
pub use executor::DetailsExecutor;
pub use intent::{DetailsAction, DetailsIntent, DetailsLabel};
pub use reducer::{DetailsMsg, DetailsReducer};
pub use state::{DetailsState, ForecastPhase};
pub use store::{DetailsStore, DetailsStoreFactory};
