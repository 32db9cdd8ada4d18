//! Executor for the details screen.

use std::sync::Arc;

use crate::domain::FavouriteRepository;
use crate::mvi::{Executor, ExecutorContext};

use super::intent::{DetailsAction, DetailsIntent, DetailsLabel};
use super::reducer::{DetailsMsg, DetailsReducer};

pub struct DetailsExecutor {
    favourites: Arc<dyn FavouriteRepository>,
}

impl DetailsExecutor {
    pub fn new(favourites: Arc<dyn FavouriteRepository>) -> Self {
        Self { favourites }
    }
}

impl Executor for DetailsExecutor {
    type Intent = DetailsIntent;
    type Action = DetailsAction;
    type Reducer = DetailsReducer;
    type Label = DetailsLabel;

    fn execute_intent(
        &mut self,
        intent: DetailsIntent,
        ctx: &ExecutorContext<DetailsReducer, DetailsLabel>,
    ) {
        match intent {
            DetailsIntent::ClickBack => ctx.publish(DetailsLabel::ClickBack),
            DetailsIntent::ClickChangeFavouriteStatus => {
                // Decide on the state as it is now, not as it was captured.
                let state = ctx.state();
                let city = state.city;
                let remove = state.is_favourite;
                ctx.dispatch(DetailsMsg::FavouriteToggleStarted);
                let favourites = Arc::clone(&self.favourites);
                ctx.launch(move |ctx| async move {
                    let city_id = city.id;
                    let result = if remove {
                        favourites.remove_from_favourite(city_id).await
                    } else {
                        favourites.add_to_favourite(city).await
                    };
                    // Success shows up through the favourite status stream.
                    if let Err(err) = result {
                        tracing::warn!(city_id, error = %err, "Favourite toggle failed");
                        ctx.dispatch(DetailsMsg::FavouriteToggleFailed(err.to_string()));
                    }
                });
            }
        }
    }

    fn execute_action(
        &mut self,
        action: DetailsAction,
        ctx: &ExecutorContext<DetailsReducer, DetailsLabel>,
    ) {
        let message = match action {
            DetailsAction::FavouriteStatusChanged(value) => DetailsMsg::FavouriteStatusChanged(value),
            DetailsAction::ForecastStartLoading => DetailsMsg::ForecastStartLoading,
            DetailsAction::ForecastLoaded(forecast) => DetailsMsg::ForecastLoaded(forecast),
            DetailsAction::ForecastLoadingError => DetailsMsg::ForecastLoadingError,
        };
        ctx.dispatch(message);
    }
}
