//! Reducer for the favourites screen.

use crate::domain::{City, Weather};
use crate::mvi::{Message, Reducer};

use super::state::{CityItem, FavouriteState, WeatherPhase};

#[derive(Debug, Clone, PartialEq)]
pub enum FavouriteMsg {
    FavouriteCitiesLoaded(Vec<City>),
    WeatherIsLoading(i64),
    WeatherLoaded(i64, Weather),
    WeatherLoadedError(i64),
}

impl Message for FavouriteMsg {}

pub struct FavouriteReducer;

impl FavouriteReducer {
    fn with_phase(mut state: FavouriteState, city_id: i64, phase: WeatherPhase) -> FavouriteState {
        // Unknown ids are ignored: the city may have been removed meanwhile.
        if let Some(item) = state.city_items.iter_mut().find(|item| item.city.id == city_id) {
            item.weather_phase = phase;
        }
        state
    }
}

impl Reducer for FavouriteReducer {
    type State = FavouriteState;
    type Message = FavouriteMsg;

    fn reduce(state: Self::State, message: Self::Message) -> Self::State {
        match message {
            FavouriteMsg::FavouriteCitiesLoaded(cities) => {
                let city_items = cities
                    .into_iter()
                    .map(|city| {
                        let weather_phase = state
                            .city_items
                            .iter()
                            .find(|item| item.city.id == city.id)
                            .map(|item| item.weather_phase.clone())
                            .unwrap_or_default();
                        CityItem {
                            city,
                            weather_phase,
                        }
                    })
                    .collect();
                FavouriteState { city_items }
            }
            FavouriteMsg::WeatherIsLoading(city_id) => {
                Self::with_phase(state, city_id, WeatherPhase::Loading)
            }
            FavouriteMsg::WeatherLoaded(city_id, weather) => {
                Self::with_phase(state, city_id, WeatherPhase::Loaded(weather))
            }
            FavouriteMsg::WeatherLoadedError(city_id) => {
                Self::with_phase(state, city_id, WeatherPhase::Error)
            }
        }
    }
}
