//! Root screen: favourite cities with their current weather.

mod bootstrapper;
mod component;
mod executor;
mod intent;
mod reducer;
mod state;
mod store;

pub use bootstrapper::FavouriteBootstrapper;
pub use component::FavouriteComponent;
pub use executor::FavouriteExecutor;
pub use intent::{FavouriteAction, FavouriteIntent, FavouriteLabel};
pub use reducer::{FavouriteMsg, FavouriteReducer};
pub use state::{CityItem, FavouriteState, WeatherPhase};
pub use store::{FavouriteStore, FavouriteStoreFactory};
