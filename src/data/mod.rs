//! Concrete collaborators: the remote weather API and local favourites.

mod dto;
mod favourites;
mod weather_api;

pub use favourites::JsonFavouriteStore;
pub use weather_api::WeatherApiClient;
