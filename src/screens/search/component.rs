//! Search component: owns the retained store and forwards its labels.

use crate::app::AppDependencies;
use crate::domain::City;
use crate::navigation::ComponentContext;
use crate::reactive::Subscription;
use crate::registry::RegistryError;

use super::intent::{OpenReason, SearchIntent, SearchLabel};
use super::state::SearchState;
use super::store::{SearchStore, SearchStoreFactory};

#[derive(Clone)]
pub struct SearchComponent {
    open_reason: OpenReason,
    store: SearchStore,
}

impl SearchComponent {
    /// Bind to the store retained for `context`, creating it on first use.
    ///
    /// `on_label` runs for every label until the component is torn down.
    pub fn new<F>(
        context: &ComponentContext,
        deps: &AppDependencies,
        open_reason: OpenReason,
        mut on_label: F,
    ) -> Result<Self, RegistryError>
    where
        F: FnMut(SearchLabel) + Send + 'static,
    {
        let store = context
            .retained_store(|| SearchStoreFactory::new(deps.clone()).create(open_reason))?;

        let mut labels = store.labels();
        context.launch(async move {
            while let Some(label) = labels.recv().await {
                on_label(label);
            }
        });

        Ok(Self { open_reason, store })
    }

    pub fn open_reason(&self) -> OpenReason {
        self.open_reason
    }

    pub fn model(&self) -> Subscription<SearchState> {
        self.store.states()
    }

    pub fn state(&self) -> SearchState {
        self.store.state()
    }

    pub fn store(&self) -> &SearchStore {
        &self.store
    }

    pub fn change_search_query(&self, query: impl Into<String>) {
        self.store.accept(SearchIntent::ChangeSearchQuery(query.into()));
    }

    pub fn on_click_back(&self) {
        self.store.accept(SearchIntent::ClickBack);
    }

    pub fn on_click_search(&self) {
        self.store.accept(SearchIntent::ClickSearch);
    }

    pub fn on_click_city(&self, city: City) {
        self.store.accept(SearchIntent::ClickCity(city));
    }
}
