//! Bootstrapper for the details screen.

use std::sync::Arc;

use futures::StreamExt;

use crate::domain::{City, FavouriteRepository, WeatherRepository};
use crate::mvi::{BootstrapContext, Bootstrapper};

use super::intent::DetailsAction;

/// Loads the forecast once and follows the favourite status.
pub struct DetailsBootstrapper {
    city: City,
    weather: Arc<dyn WeatherRepository>,
    favourites: Arc<dyn FavouriteRepository>,
}

impl DetailsBootstrapper {
    pub fn new(
        city: City,
        weather: Arc<dyn WeatherRepository>,
        favourites: Arc<dyn FavouriteRepository>,
    ) -> Self {
        Self {
            city,
            weather,
            favourites,
        }
    }
}

impl Bootstrapper for DetailsBootstrapper {
    type Action = DetailsAction;

    fn invoke(&mut self, ctx: &BootstrapContext<DetailsAction>) {
        let mut is_favourite = self.favourites.observe_is_favourite(self.city.id);
        ctx.launch(move |ctx| async move {
            while let Some(value) = is_favourite.next().await {
                ctx.dispatch(DetailsAction::FavouriteStatusChanged(value));
            }
        });

        let weather = Arc::clone(&self.weather);
        let city_id = self.city.id;
        ctx.launch(move |ctx| async move {
            ctx.dispatch(DetailsAction::ForecastStartLoading);
            match weather.get_forecast(city_id).await {
                Ok(forecast) => ctx.dispatch(DetailsAction::ForecastLoaded(forecast)),
                Err(err) => {
                    tracing::warn!(city_id, error = %err, "Forecast load failed");
                    ctx.dispatch(DetailsAction::ForecastLoadingError);
                }
            }
        });
    }
}
