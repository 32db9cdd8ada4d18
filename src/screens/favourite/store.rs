//! Favourites store factory.

use crate::app::AppDependencies;
use crate::mvi::{Store, StoreBuilder};

use super::bootstrapper::FavouriteBootstrapper;
use super::executor::FavouriteExecutor;
use super::intent::{FavouriteIntent, FavouriteLabel};
use super::state::FavouriteState;

pub type FavouriteStore = Store<FavouriteIntent, FavouriteState, FavouriteLabel>;

pub struct FavouriteStoreFactory {
    deps: AppDependencies,
}

impl FavouriteStoreFactory {
    pub fn new(deps: AppDependencies) -> Self {
        Self { deps }
    }

    pub fn create(&self) -> FavouriteStore {
        StoreBuilder::new(
            "FavouriteStore",
            FavouriteState::new(),
            FavouriteExecutor::new(self.deps.weather.clone()),
        )
        .bootstrapper(FavouriteBootstrapper::new(self.deps.favourites.clone()))
        .buffers(self.deps.store.state_buffer, self.deps.store.label_buffer)
        .build()
    }
}
