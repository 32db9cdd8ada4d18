//! Details component.

use crate::app::AppDependencies;
use crate::domain::City;
use crate::navigation::ComponentContext;
use crate::reactive::Subscription;
use crate::registry::RegistryError;

use super::intent::{DetailsIntent, DetailsLabel};
use super::state::DetailsState;
use super::store::{DetailsStore, DetailsStoreFactory};

#[derive(Clone)]
pub struct DetailsComponent {
    store: DetailsStore,
}

impl DetailsComponent {
    pub fn new<F>(
        context: &ComponentContext,
        deps: &AppDependencies,
        city: City,
        mut on_label: F,
    ) -> Result<Self, RegistryError>
    where
        F: FnMut(DetailsLabel) + Send + 'static,
    {
        let store = context.retained_store(|| DetailsStoreFactory::new(deps.clone()).create(city))?;

        let mut labels = store.labels();
        context.launch(async move {
            while let Some(label) = labels.recv().await {
                on_label(label);
            }
        });

        Ok(Self { store })
    }

    pub fn model(&self) -> Subscription<DetailsState> {
        self.store.states()
    }

    pub fn state(&self) -> DetailsState {
        self.store.state()
    }

    pub fn store(&self) -> &DetailsStore {
        &self.store
    }

    pub fn on_click_back(&self) {
        self.store.accept(DetailsIntent::ClickBack);
    }

    pub fn on_click_change_favourite_status(&self) {
        self.store.accept(DetailsIntent::ClickChangeFavouriteStatus);
    }
}
