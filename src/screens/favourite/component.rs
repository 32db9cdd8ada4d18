//! Favourites component.

use crate::app::AppDependencies;
use crate::domain::City;
use crate::navigation::ComponentContext;
use crate::reactive::Subscription;
use crate::registry::RegistryError;

use super::intent::{FavouriteIntent, FavouriteLabel};
use super::state::FavouriteState;
use super::store::{FavouriteStore, FavouriteStoreFactory};

#[derive(Clone)]
pub struct FavouriteComponent {
    store: FavouriteStore,
}

impl FavouriteComponent {
    pub fn new<F>(
        context: &ComponentContext,
        deps: &AppDependencies,
        mut on_label: F,
    ) -> Result<Self, RegistryError>
    where
        F: FnMut(FavouriteLabel) + Send + 'static,
    {
        let store = context.retained_store(|| FavouriteStoreFactory::new(deps.clone()).create())?;

        let mut labels = store.labels();
        context.launch(async move {
            while let Some(label) = labels.recv().await {
                on_label(label);
            }
        });

        Ok(Self { store })
    }

    pub fn model(&self) -> Subscription<FavouriteState> {
        self.store.states()
    }

    pub fn state(&self) -> FavouriteState {
        self.store.state()
    }

    pub fn store(&self) -> &FavouriteStore {
        &self.store
    }

    pub fn on_click_search(&self) {
        self.store.accept(FavouriteIntent::ClickSearch);
    }

    pub fn on_click_add_favourite(&self) {
        self.store.accept(FavouriteIntent::ClickAddFavourite);
    }

    pub fn on_city_item_click(&self, city: City) {
        self.store.accept(FavouriteIntent::CityItemClick(city));
    }
}
