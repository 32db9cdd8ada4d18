//! Shared test utilities and fake collaborators.

#![allow(dead_code, unused_imports)]

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::BoxStream;
use parking_lot::Mutex;
use tokio::sync::Notify;

use weather_app::app::AppDependencies;
use weather_app::data::JsonFavouriteStore;
use weather_app::domain::{
    City, FavouriteRepository, Forecast, RepositoryError, SearchRepository, Weather,
    WeatherRepository,
};
use weather_app::reactive::Subscription;

pub const WAIT: Duration = Duration::from_secs(2);

pub fn london() -> City {
    City::new(1, "London", "UK")
}

pub fn oslo() -> City {
    City::new(5, "Oslo", "Norway")
}

pub fn rome() -> City {
    City::new(7, "Rome", "Italy")
}

pub fn weather(temp_c: f32) -> Weather {
    Weather {
        temp_c,
        condition_text: "Partly cloudy".to_string(),
        condition_url: "https://cdn.weatherapi.com/weather/128x128/day/116.png".to_string(),
        date: "2024-05-01".to_string(),
    }
}

pub fn forecast(temp_c: f32) -> Forecast {
    Forecast {
        current_weather: weather(temp_c),
        upcoming: vec![weather(temp_c - 1.0), weather(temp_c - 2.0)],
    }
}

/// Await `future`, failing the test if it takes longer than [`WAIT`].
pub async fn within<T>(what: &str, future: impl Future<Output = T>) -> T {
    tokio::time::timeout(WAIT, future)
        .await
        .unwrap_or_else(|_| panic!("timed out waiting for {what}"))
}

/// Next value from `subscription` satisfying `pred`.
pub async fn next_matching<T, F>(subscription: &mut Subscription<T>, pred: F) -> T
where
    T: Clone + Send + std::fmt::Debug + 'static,
    F: Fn(&T) -> bool,
{
    within("matching value", async {
        loop {
            match subscription.recv().await {
                Some(value) if pred(&value) => return value,
                Some(_) => continue,
                None => panic!("subscription ended before a matching value"),
            }
        }
    })
    .await
}

/// Poll `condition` until it holds.
pub async fn eventually(what: &str, condition: impl Fn() -> bool) {
    within(what, async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
}

/// Give spawned tasks a chance to run.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}

/// Search backed by a fixed table. Queries with a gate block until released.
#[derive(Default)]
pub struct FakeSearch {
    results: Mutex<HashMap<String, Vec<City>>>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    queries: Mutex<Vec<String>>,
    fail: AtomicBool,
}

impl FakeSearch {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_results(&self, query: &str, cities: Vec<City>) {
        self.results.lock().insert(query.to_string(), cities);
    }

    pub fn gate(&self, query: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates.lock().insert(query.to_string(), gate.clone());
        gate
    }

    pub fn fail(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().clone()
    }
}

#[async_trait]
impl SearchRepository for FakeSearch {
    async fn search(&self, query: &str) -> Result<Vec<City>, RepositoryError> {
        self.queries.lock().push(query.to_string());
        let gate = self.gates.lock().get(query).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        if self.fail.load(Ordering::SeqCst) {
            return Err(RepositoryError::Network("connection refused".to_string()));
        }
        Ok(self.results.lock().get(query).cloned().unwrap_or_default())
    }
}

/// Weather backed by fixed tables, with per-city gates and call counts.
#[derive(Default)]
pub struct FakeWeather {
    forecasts: Mutex<HashMap<i64, Forecast>>,
    current: Mutex<HashMap<i64, Weather>>,
    gates: Mutex<HashMap<i64, Arc<Notify>>>,
    weather_calls: Mutex<HashMap<i64, usize>>,
    fail: AtomicBool,
}

impl FakeWeather {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_forecast(&self, city_id: i64, forecast: Forecast) {
        self.forecasts.lock().insert(city_id, forecast);
    }

    pub fn with_weather(&self, city_id: i64, weather: Weather) {
        self.current.lock().insert(city_id, weather);
    }

    pub fn gate(&self, city_id: i64) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates.lock().insert(city_id, gate.clone());
        gate
    }

    pub fn fail(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn weather_calls(&self, city_id: i64) -> usize {
        self.weather_calls.lock().get(&city_id).copied().unwrap_or(0)
    }

    async fn wait_gate(&self, city_id: i64) -> Result<(), RepositoryError> {
        let gate = self.gates.lock().get(&city_id).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        if self.fail.load(Ordering::SeqCst) {
            return Err(RepositoryError::Status {
                status: 500,
                message: "upstream unavailable".to_string(),
            });
        }
        Ok(())
    }
}

fn unknown_city(city_id: i64) -> RepositoryError {
    RepositoryError::Status {
        status: 400,
        message: format!("No matching location found for id:{city_id}"),
    }
}

#[async_trait]
impl WeatherRepository for FakeWeather {
    async fn get_weather(&self, city_id: i64) -> Result<Weather, RepositoryError> {
        *self.weather_calls.lock().entry(city_id).or_default() += 1;
        self.wait_gate(city_id).await?;
        self.current
            .lock()
            .get(&city_id)
            .cloned()
            .ok_or_else(|| unknown_city(city_id))
    }

    async fn get_forecast(&self, city_id: i64) -> Result<Forecast, RepositoryError> {
        self.wait_gate(city_id).await?;
        self.forecasts
            .lock()
            .get(&city_id)
            .cloned()
            .ok_or_else(|| unknown_city(city_id))
    }
}

/// In-memory favourites whose writes can be made to fail.
pub struct FlakyFavourites {
    inner: JsonFavouriteStore,
    fail_writes: AtomicBool,
}

impl FlakyFavourites {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: JsonFavouriteStore::in_memory(),
            fail_writes: AtomicBool::new(false),
        })
    }

    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    pub fn heal_writes(&self) {
        self.fail_writes.store(false, Ordering::SeqCst);
    }

    pub fn cities(&self) -> Vec<City> {
        self.inner.cities()
    }

    fn check(&self) -> Result<(), RepositoryError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RepositoryError::Storage("disk full".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl FavouriteRepository for FlakyFavourites {
    fn favourite_cities(&self) -> BoxStream<'static, Vec<City>> {
        self.inner.favourite_cities()
    }

    fn observe_is_favourite(&self, city_id: i64) -> BoxStream<'static, bool> {
        self.inner.observe_is_favourite(city_id)
    }

    async fn add_to_favourite(&self, city: City) -> Result<(), RepositoryError> {
        self.check()?;
        self.inner.add_to_favourite(city).await
    }

    async fn remove_from_favourite(&self, city_id: i64) -> Result<(), RepositoryError> {
        self.check()?;
        self.inner.remove_from_favourite(city_id).await
    }
}

/// Fakes wired together the way the app wires real collaborators.
pub struct TestApp {
    pub weather: Arc<FakeWeather>,
    pub search: Arc<FakeSearch>,
    pub favourites: Arc<FlakyFavourites>,
}

impl TestApp {
    pub fn new() -> Self {
        let weather = FakeWeather::new();
        for (city, temp) in [(london(), 14.0), (oslo(), 3.0), (rome(), 22.0)] {
            weather.with_forecast(city.id, forecast(temp));
            weather.with_weather(city.id, self::weather(temp));
        }
        let search = FakeSearch::new();
        search.with_results("Lon", vec![london()]);
        search.with_results("Oslo", vec![oslo()]);
        Self {
            weather,
            search,
            favourites: FlakyFavourites::new(),
        }
    }

    pub fn deps(&self) -> AppDependencies {
        AppDependencies::new(
            self.weather.clone(),
            self.search.clone(),
            self.favourites.clone(),
        )
    }
}
