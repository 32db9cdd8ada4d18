//! Executor for the favourites screen.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{City, WeatherRepository};
use crate::mvi::{Executor, ExecutorContext, Job};

use super::intent::{FavouriteAction, FavouriteIntent, FavouriteLabel};
use super::reducer::{FavouriteMsg, FavouriteReducer};

type Ctx = ExecutorContext<FavouriteReducer, FavouriteLabel>;

pub struct FavouriteExecutor {
    weather: Arc<dyn WeatherRepository>,
    /// One load per shown city; kept after completion so the weather is not
    /// fetched again on every list update.
    weather_jobs: HashMap<i64, Job>,
}

impl FavouriteExecutor {
    pub fn new(weather: Arc<dyn WeatherRepository>) -> Self {
        Self {
            weather,
            weather_jobs: HashMap::new(),
        }
    }

    fn sync_weather_loads(&mut self, cities: &[City], ctx: &Ctx) {
        self.weather_jobs.retain(|city_id, job| {
            let shown = cities.iter().any(|city| city.id == *city_id);
            if !shown {
                job.cancel();
            }
            shown
        });

        for city in cities {
            if !self.weather_jobs.contains_key(&city.id) {
                let job = self.load_weather(city.id, ctx);
                self.weather_jobs.insert(city.id, job);
            }
        }
    }

    fn load_weather(&self, city_id: i64, ctx: &Ctx) -> Job {
        ctx.dispatch(FavouriteMsg::WeatherIsLoading(city_id));
        let weather = Arc::clone(&self.weather);
        ctx.launch(move |ctx| async move {
            match weather.get_weather(city_id).await {
                Ok(current) => ctx.dispatch(FavouriteMsg::WeatherLoaded(city_id, current)),
                Err(err) => {
                    tracing::warn!(city_id, error = %err, "Weather load failed");
                    ctx.dispatch(FavouriteMsg::WeatherLoadedError(city_id));
                }
            }
        })
    }
}

impl Executor for FavouriteExecutor {
    type Intent = FavouriteIntent;
    type Action = FavouriteAction;
    type Reducer = FavouriteReducer;
    type Label = FavouriteLabel;

    fn execute_intent(&mut self, intent: FavouriteIntent, ctx: &Ctx) {
        match intent {
            FavouriteIntent::ClickSearch => ctx.publish(FavouriteLabel::ClickSearch),
            FavouriteIntent::ClickAddFavourite => ctx.publish(FavouriteLabel::ClickToFavourite),
            FavouriteIntent::CityItemClick(city) => ctx.publish(FavouriteLabel::CityItemClick(city)),
        }
    }

    fn execute_action(&mut self, action: FavouriteAction, ctx: &Ctx) {
        match action {
            FavouriteAction::FavouriteCitiesLoaded(cities) => {
                ctx.dispatch(FavouriteMsg::FavouriteCitiesLoaded(cities.clone()));
                self.sync_weather_loads(&cities, ctx);
            }
        }
    }

    fn dispose(&mut self) {
        for (_, job) in self.weather_jobs.drain() {
            job.cancel();
        }
    }
}
