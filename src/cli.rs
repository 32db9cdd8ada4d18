//! Headless driver: runs the screens through the root component the way a
//! user would tap through them, printing what each screen shows.

use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use futures::StreamExt;

use weather_app::app::AppDependencies;
use weather_app::domain::{City, Weather};
use weather_app::reactive::Subscription;
use weather_app::screens::details::{DetailsComponent, ForecastPhase};
use weather_app::screens::favourite::{FavouriteComponent, WeatherPhase};
use weather_app::screens::search::{OpenReason, SearchComponent, SearchPhase, SearchState};
use weather_app::screens::{Child, RootComponent};

#[derive(Parser)]
#[command(name = "weather-app")]
#[command(about = "Search cities, view forecasts and manage favourites", long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Search cities by name
    Search {
        query: String,
    },

    /// Show the forecast for a search result
    Show {
        query: String,

        /// Which search result to open
        #[arg(short, long, default_value_t = 0)]
        index: usize,
    },

    /// Add a search result to favourites
    Add {
        query: String,

        /// Which search result to add
        #[arg(short, long, default_value_t = 0)]
        index: usize,
    },

    /// List favourite cities with their current weather
    Favourites,
}

/// Drives one command against a freshly built root.
pub struct Runner {
    root: RootComponent,
    deps: AppDependencies,
    timeout: Duration,
}

impl Runner {
    pub fn new(deps: AppDependencies, timeout: Duration) -> Result<Self> {
        let root = RootComponent::new(deps.clone()).context("failed to build root screen")?;
        Ok(Self {
            root,
            deps,
            timeout,
        })
    }

    pub async fn run(&self, command: Command) -> Result<()> {
        match command {
            Command::Search { query } => {
                let (_, cities) = self.search(OpenReason::RegularSearch, &query).await?;
                if cities.is_empty() {
                    println!("No cities found for '{query}'");
                }
                for (index, city) in cities.iter().enumerate() {
                    println!("{index}. {}", format_city(city));
                }
            }
            Command::Show { query, index } => {
                let (search, cities) = self.search(OpenReason::RegularSearch, &query).await?;
                let city = pick(&cities, index, &query)?;
                search.on_click_city(city);
                let details = self.wait("details screen", self.active(as_details)).await?;
                self.show_details(&details).await?;
            }
            Command::Add { query, index } => {
                let (search, cities) = self.search(OpenReason::AddToFavourite, &query).await?;
                let city = pick(&cities, index, &query)?;
                let mut model = search.model();
                search.on_click_city(city.clone());
                // The search screen closes on success and stays on failure.
                let saved = async {
                    tokio::select! {
                        Some(_) = self.active(as_favourite) => Ok(()),
                        Some(_) = wait_until(&mut model, |s| s.phase == SearchPhase::Error) => {
                            bail!("failed to save {}", format_city(&city))
                        }
                        else => bail!("search screen closed unexpectedly"),
                    }
                };
                tokio::time::timeout(self.timeout, saved)
                    .await
                    .context("timed out saving favourite")??;
                println!("Added {} to favourites", format_city(&city));
            }
            Command::Favourites => {
                let favourite = self.wait("favourites screen", self.active(as_favourite)).await?;
                self.show_favourites(&favourite).await?;
            }
        }
        Ok(())
    }

    async fn search(&self, reason: OpenReason, query: &str) -> Result<(SearchComponent, Vec<City>)> {
        let favourite = self.wait("favourites screen", self.active(as_favourite)).await?;
        match reason {
            OpenReason::RegularSearch => favourite.on_click_search(),
            OpenReason::AddToFavourite => favourite.on_click_add_favourite(),
        }
        let search = self.wait("search screen", self.active(as_search)).await?;

        let mut model = search.model();
        search.change_search_query(query);
        search.on_click_search();
        let state = self
            .wait("search results", wait_until(&mut model, SearchState::is_settled))
            .await?;

        let cities = match state.phase {
            SearchPhase::Searched(cities) => cities,
            SearchPhase::EmptyResult => Vec::new(),
            SearchPhase::Error => bail!("search for '{query}' failed"),
            other => bail!("unexpected search phase: {other:?}"),
        };
        Ok((search, cities))
    }

    async fn show_details(&self, details: &DetailsComponent) -> Result<()> {
        let mut model = details.model();
        let state = self
            .wait(
                "forecast",
                wait_until(&mut model, |s| {
                    matches!(s.forecast_phase, ForecastPhase::Loaded(_) | ForecastPhase::Error)
                }),
            )
            .await?;

        let marker = if state.is_favourite { " [favourite]" } else { "" };
        println!("{}{marker}", format_city(&state.city));
        match state.forecast_phase {
            ForecastPhase::Loaded(forecast) => {
                println!("Now         {}", format_weather(&forecast.current_weather));
                for day in &forecast.upcoming {
                    println!("{:<11} {}", day.date, format_weather(day));
                }
            }
            _ => bail!("failed to load forecast"),
        }
        Ok(())
    }

    async fn show_favourites(&self, favourite: &FavouriteComponent) -> Result<()> {
        let expected = self
            .deps
            .favourites
            .favourite_cities()
            .next()
            .await
            .map(|cities| cities.len())
            .unwrap_or(0);
        if expected == 0 {
            println!("No favourite cities yet");
            return Ok(());
        }

        let mut model = favourite.model();
        let state = self
            .wait(
                "favourite weather",
                wait_until(&mut model, |s| s.city_items.len() == expected && s.is_settled()),
            )
            .await?;

        for item in &state.city_items {
            let weather = match &item.weather_phase {
                WeatherPhase::Loaded(weather) => format_weather(weather),
                _ => "weather unavailable".to_string(),
            };
            println!("{:<32} {weather}", format_city(&item.city));
        }
        Ok(())
    }

    /// Resolves once the active screen matches `pick`.
    async fn active<T>(&self, pick: fn(Child) -> Option<T>) -> Option<T> {
        let mut snapshots = self.root.stack().subscribe();
        loop {
            if let Some(found) = pick(self.root.active_child()) {
                return Some(found);
            }
            snapshots.changed().await.ok()?;
        }
    }

    async fn wait<T>(&self, what: &str, future: impl Future<Output = Option<T>>) -> Result<T> {
        tokio::time::timeout(self.timeout, future)
            .await
            .with_context(|| format!("timed out waiting for {what}"))?
            .with_context(|| format!("{what} closed unexpectedly"))
    }
}

async fn wait_until<S, F>(model: &mut Subscription<S>, done: F) -> Option<S>
where
    S: Clone + Send + 'static,
    F: Fn(&S) -> bool,
{
    while let Some(state) = model.recv().await {
        if done(&state) {
            return Some(state);
        }
    }
    None
}

fn as_favourite(child: Child) -> Option<FavouriteComponent> {
    match child {
        Child::Favourite(component) => Some(component),
        _ => None,
    }
}

fn as_search(child: Child) -> Option<SearchComponent> {
    match child {
        Child::Search(component) => Some(component),
        _ => None,
    }
}

fn as_details(child: Child) -> Option<DetailsComponent> {
    match child {
        Child::Details(component) => Some(component),
        _ => None,
    }
}

fn pick(cities: &[City], index: usize, query: &str) -> Result<City> {
    cities
        .get(index)
        .cloned()
        .with_context(|| format!("no result #{index} for '{query}' ({} found)", cities.len()))
}

fn format_city(city: &City) -> String {
    format!("{}, {}", city.name, city.country)
}

fn format_weather(weather: &Weather) -> String {
    format!("{:>5.1}°C  {}", weather.temp_c, weather.condition_text)
}
