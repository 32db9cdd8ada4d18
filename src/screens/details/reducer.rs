//! Reducer for the details screen.

use crate::domain::Forecast;
use crate::mvi::{Message, Reducer};

use super::state::{DetailsState, ForecastPhase};

#[derive(Debug, Clone, PartialEq)]
pub enum DetailsMsg {
    FavouriteStatusChanged(bool),
    ForecastStartLoading,
    ForecastLoaded(Forecast),
    ForecastLoadingError,
    /// A new toggle attempt: any earlier failure no longer applies.
    FavouriteToggleStarted,
    FavouriteToggleFailed(String),
}

impl Message for DetailsMsg {}

pub struct DetailsReducer;

impl Reducer for DetailsReducer {
    type State = DetailsState;
    type Message = DetailsMsg;

    fn reduce(state: Self::State, message: Self::Message) -> Self::State {
        match message {
            DetailsMsg::FavouriteStatusChanged(is_favourite) => DetailsState {
                is_favourite,
                favourite_error: None,
                ..state
            },
            DetailsMsg::ForecastStartLoading => DetailsState {
                forecast_phase: ForecastPhase::Loading,
                ..state
            },
            DetailsMsg::ForecastLoaded(forecast) => DetailsState {
                forecast_phase: ForecastPhase::Loaded(forecast),
                ..state
            },
            DetailsMsg::ForecastLoadingError => DetailsState {
                forecast_phase: ForecastPhase::Error,
                ..state
            },
            DetailsMsg::FavouriteToggleStarted => DetailsState {
                favourite_error: None,
                ..state
            },
            DetailsMsg::FavouriteToggleFailed(reason) => DetailsState {
                favourite_error: Some(reason),
                ..state
            },
        }
    }
}
