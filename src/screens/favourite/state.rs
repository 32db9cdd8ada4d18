//! State for the favourites screen.

use crate::domain::{City, Weather};
use crate::mvi::UiState;

/// Current-weather load progress of one favourite.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum WeatherPhase {
    #[default]
    Initial,
    Loading,
    Error,
    Loaded(Weather),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CityItem {
    pub city: City,
    pub weather_phase: WeatherPhase,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FavouriteState {
    pub city_items: Vec<CityItem>,
}

impl UiState for FavouriteState {}

impl FavouriteState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no item is waiting for its weather.
    pub fn is_settled(&self) -> bool {
        self.city_items.iter().all(|item| {
            matches!(
                item.weather_phase,
                WeatherPhase::Loaded(_) | WeatherPhase::Error
            )
        })
    }
}
