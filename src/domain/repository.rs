//! Interfaces of the collaborators the stores depend on.

use async_trait::async_trait;
use futures::stream::BoxStream;

use super::entity::{City, Forecast, Weather};
use super::error::RepositoryError;

/// Current conditions and forecasts.
#[async_trait]
pub trait WeatherRepository: Send + Sync {
    async fn get_weather(&self, city_id: i64) -> Result<Weather, RepositoryError>;

    async fn get_forecast(&self, city_id: i64) -> Result<Forecast, RepositoryError>;
}

/// City lookup by free text.
#[async_trait]
pub trait SearchRepository: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<City>, RepositoryError>;
}

/// Persistent favourite cities, shared by every screen.
///
/// Both observation streams replay the current value to each new subscriber
/// and then emit on every change. Writes are idempotent and serialized.
#[async_trait]
pub trait FavouriteRepository: Send + Sync {
    fn favourite_cities(&self) -> BoxStream<'static, Vec<City>>;

    fn observe_is_favourite(&self, city_id: i64) -> BoxStream<'static, bool>;

    async fn add_to_favourite(&self, city: City) -> Result<(), RepositoryError>;

    async fn remove_from_favourite(&self, city_id: i64) -> Result<(), RepositoryError>;
}
