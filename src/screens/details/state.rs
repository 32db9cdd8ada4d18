//! State for the details screen.

use crate::domain::{City, Forecast};
use crate::mvi::UiState;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ForecastPhase {
    #[default]
    Initial,
    Loading,
    Error,
    Loaded(Forecast),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailsState {
    pub city: City,
    pub is_favourite: bool,
    pub forecast_phase: ForecastPhase,
    /// Why the last favourite toggle failed; cleared by the next status update.
    pub favourite_error: Option<String>,
}

impl UiState for DetailsState {}

impl DetailsState {
    pub fn new(city: City) -> Self {
        Self {
            city,
            is_favourite: false,
            forecast_phase: ForecastPhase::Initial,
            favourite_error: None,
        }
    }

    pub fn forecast(&self) -> Option<&Forecast> {
        match &self.forecast_phase {
            ForecastPhase::Loaded(forecast) => Some(forecast),
            _ => None,
        }
    }
}
