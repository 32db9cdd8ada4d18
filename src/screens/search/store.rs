//! Search store factory.

use crate::app::AppDependencies;
use crate::mvi::{Store, StoreBuilder};

use super::executor::SearchExecutor;
use super::intent::{OpenReason, SearchIntent, SearchLabel};
use super::state::SearchState;

pub type SearchStore = Store<SearchIntent, SearchState, SearchLabel>;

pub struct SearchStoreFactory {
    deps: AppDependencies,
}

impl SearchStoreFactory {
    pub fn new(deps: AppDependencies) -> Self {
        Self { deps }
    }

    pub fn create(&self, open_reason: OpenReason) -> SearchStore {
        let executor = SearchExecutor::new(
            open_reason,
            self.deps.search.clone(),
            self.deps.favourites.clone(),
        );
        StoreBuilder::new("SearchStore", SearchState::new(), executor)
            .buffers(self.deps.store.state_buffer, self.deps.store.label_buffer)
            .build()
    }
}
