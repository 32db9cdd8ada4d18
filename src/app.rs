//! Explicit wiring of the collaborators every screen depends on.

use std::sync::Arc;

use crate::config::{Config, StoreConfig};
use crate::data::{JsonFavouriteStore, WeatherApiClient};
use crate::domain::{FavouriteRepository, RepositoryError, SearchRepository, WeatherRepository};

/// Shared collaborators handed to every store factory. Cheap to clone.
#[derive(Clone)]
pub struct AppDependencies {
    pub weather: Arc<dyn WeatherRepository>,
    pub search: Arc<dyn SearchRepository>,
    pub favourites: Arc<dyn FavouriteRepository>,
    pub store: StoreConfig,
}

impl AppDependencies {
    pub fn new(
        weather: Arc<dyn WeatherRepository>,
        search: Arc<dyn SearchRepository>,
        favourites: Arc<dyn FavouriteRepository>,
    ) -> Self {
        Self {
            weather,
            search,
            favourites,
            store: StoreConfig::default(),
        }
    }

    pub fn with_store_config(mut self, store: StoreConfig) -> Self {
        self.store = store;
        self
    }

    /// Production wiring: weatherapi.com client plus the JSON favourites file.
    pub fn from_config(config: &Config) -> Result<Self, RepositoryError> {
        let client = Arc::new(WeatherApiClient::new(&config.api)?);
        let favourites = Arc::new(JsonFavouriteStore::open(
            config.storage.resolve_favourites_path(),
        )?);
        Ok(Self::new(client.clone(), client, favourites).with_store_config(config.store.clone()))
    }
}
