//! Details store factory.

use crate::app::AppDependencies;
use crate::domain::City;
use crate::mvi::{Store, StoreBuilder};

use super::bootstrapper::DetailsBootstrapper;
use super::executor::DetailsExecutor;
use super::intent::{DetailsIntent, DetailsLabel};
use super::state::DetailsState;

pub type DetailsStore = Store<DetailsIntent, DetailsState, DetailsLabel>;

pub struct DetailsStoreFactory {
    deps: AppDependencies,
}

impl DetailsStoreFactory {
    pub fn new(deps: AppDependencies) -> Self {
        Self { deps }
    }

    pub fn create(&self, city: City) -> DetailsStore {
        let bootstrapper = DetailsBootstrapper::new(
            city.clone(),
            self.deps.weather.clone(),
            self.deps.favourites.clone(),
        );
        let executor = DetailsExecutor::new(self.deps.favourites.clone());
        StoreBuilder::new("DetailsStore", DetailsState::new(city), executor)
            .bootstrapper(bootstrapper)
            .buffers(self.deps.store.state_buffer, self.deps.store.label_buffer)
            .build()
    }
}
