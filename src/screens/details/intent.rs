//! Inputs and outputs of the details store.

use crate::domain::Forecast;
use crate::mvi::{Action, Intent, Label};

/// User actions on the details screen.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailsIntent {
    ClickBack,

    /// Add the city to favourites, or remove it if it already is one.
    ClickChangeFavouriteStatus,
}

impl Intent for DetailsIntent {}

/// Events produced by [`DetailsBootstrapper`](super::DetailsBootstrapper).
#[derive(Debug, Clone, PartialEq)]
pub enum DetailsAction {
    /// Current favourite status; sent once on start and on every change.
    FavouriteStatusChanged(bool),
    ForecastStartLoading,
    ForecastLoaded(Forecast),
    ForecastLoadingError,
}

impl Action for DetailsAction {}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailsLabel {
    ClickBack,
}

impl Label for DetailsLabel {}
