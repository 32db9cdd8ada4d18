//! Domain entities and the collaborator interfaces the core consumes.

mod entity;
mod error;
mod repository;

pub use entity::{City, Forecast, Weather};
pub use error::RepositoryError;
pub use repository::{FavouriteRepository, SearchRepository, WeatherRepository};
