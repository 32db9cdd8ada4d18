//! Executor for the search screen.

use std::sync::Arc;

use crate::domain::{FavouriteRepository, SearchRepository};
use crate::mvi::{Executor, ExecutorContext, Job};

use super::intent::{OpenReason, SearchAction, SearchIntent, SearchLabel};
use super::reducer::{SearchMsg, SearchReducer};

pub struct SearchExecutor {
    open_reason: OpenReason,
    search: Arc<dyn SearchRepository>,
    favourites: Arc<dyn FavouriteRepository>,
    search_job: Option<Job>,
}

impl SearchExecutor {
    pub fn new(
        open_reason: OpenReason,
        search: Arc<dyn SearchRepository>,
        favourites: Arc<dyn FavouriteRepository>,
    ) -> Self {
        Self {
            open_reason,
            search,
            favourites,
            search_job: None,
        }
    }

    fn start_search(&mut self, ctx: &ExecutorContext<SearchReducer, SearchLabel>) {
        // Latest wins: the previous search contributes nothing after this point.
        if let Some(job) = self.search_job.take() {
            job.cancel();
        }

        let query = ctx.state().query;
        ctx.dispatch(SearchMsg::LoadingSearchResult);

        let search = Arc::clone(&self.search);
        self.search_job = Some(ctx.launch(move |ctx| async move {
            match search.search(&query).await {
                Ok(cities) => ctx.dispatch(SearchMsg::SearchResultLoaded(cities)),
                Err(err) => {
                    tracing::warn!(query = %query, error = %err, "Search failed");
                    ctx.dispatch(SearchMsg::ErrorLoadingSearchResult);
                }
            }
        }));
    }
}

impl Executor for SearchExecutor {
    type Intent = SearchIntent;
    type Action = SearchAction;
    type Reducer = SearchReducer;
    type Label = SearchLabel;

    fn execute_intent(
        &mut self,
        intent: SearchIntent,
        ctx: &ExecutorContext<SearchReducer, SearchLabel>,
    ) {
        match intent {
            SearchIntent::ChangeSearchQuery(query) => {
                ctx.dispatch(SearchMsg::ChangeSearchQuery(query));
            }
            SearchIntent::ClickBack => ctx.publish(SearchLabel::ClickBack),
            SearchIntent::ClickSearch => self.start_search(ctx),
            SearchIntent::ClickCity(city) => match self.open_reason {
                OpenReason::RegularSearch => ctx.publish(SearchLabel::OpenForecast(city)),
                OpenReason::AddToFavourite => {
                    let favourites = Arc::clone(&self.favourites);
                    ctx.launch(move |ctx| async move {
                        let city_id = city.id;
                        match favourites.add_to_favourite(city).await {
                            Ok(()) => ctx.publish(SearchLabel::SavedToFavourite),
                            Err(err) => {
                                tracing::warn!(city_id, error = %err, "Saving favourite failed");
                                ctx.dispatch(SearchMsg::ErrorSaving);
                            }
                        }
                    });
                }
            },
        }
    }

    fn execute_action(
        &mut self,
        action: SearchAction,
        _ctx: &ExecutorContext<SearchReducer, SearchLabel>,
    ) {
        match action {}
    }

    fn dispose(&mut self) {
        if let Some(job) = self.search_job.take() {
            job.cancel();
        }
    }
}
