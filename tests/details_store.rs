//! Details store: forecast loading and the favourite toggle.

mod common;

use common::*;
use weather_app::domain::FavouriteRepository;
use weather_app::screens::details::{
    DetailsIntent, DetailsLabel, DetailsState, DetailsStore, DetailsStoreFactory, ForecastPhase,
};

fn create(app: &TestApp) -> DetailsStore {
    DetailsStoreFactory::new(app.deps()).create(oslo())
}

fn is_loaded(state: &DetailsState) -> bool {
    matches!(state.forecast_phase, ForecastPhase::Loaded(_))
}

#[tokio::test]
async fn bootstrap_loads_forecast() {
    let app = TestApp::new();
    let store = create(&app);
    let mut states = store.states();

    let state = next_matching(&mut states, is_loaded).await;
    assert_eq!(state.forecast(), Some(&forecast(3.0)));
    assert_eq!(state.city, oslo());
    assert!(!state.is_favourite);
}

#[tokio::test]
async fn forecast_failure_shows_error() {
    let app = TestApp::new();
    app.weather.fail();
    let store = create(&app);
    let mut states = store.states();

    next_matching(&mut states, |s| s.forecast_phase == ForecastPhase::Error).await;
}

#[tokio::test]
async fn external_favourite_change_leaves_forecast_alone() {
    let app = TestApp::new();
    let store = create(&app);
    let mut states = store.states();
    let loaded = next_matching(&mut states, is_loaded).await;
    assert!(!loaded.is_favourite);

    // Another screen adds the city.
    app.favourites.add_to_favourite(oslo()).await.unwrap();

    let state = next_matching(&mut states, |s| s.is_favourite).await;
    assert_eq!(state.forecast_phase, loaded.forecast_phase);
}

#[tokio::test]
async fn toggle_adds_then_removes() {
    let app = TestApp::new();
    let store = create(&app);
    let mut states = store.states();
    next_matching(&mut states, is_loaded).await;

    store.accept(DetailsIntent::ClickChangeFavouriteStatus);
    next_matching(&mut states, |s| s.is_favourite).await;
    assert_eq!(app.favourites.cities(), vec![oslo()]);

    store.accept(DetailsIntent::ClickChangeFavouriteStatus);
    next_matching(&mut states, |s| !s.is_favourite).await;
    assert!(app.favourites.cities().is_empty());
}

#[tokio::test]
async fn toggle_reads_current_status() {
    let app = TestApp::new();
    app.favourites.add_to_favourite(oslo()).await.unwrap();
    let store = create(&app);
    let mut states = store.states();
    next_matching(&mut states, |s| s.is_favourite).await;

    store.accept(DetailsIntent::ClickChangeFavouriteStatus);
    next_matching(&mut states, |s| !s.is_favourite).await;
    assert!(app.favourites.cities().is_empty());
}

#[tokio::test]
async fn failed_toggle_reports_error() {
    let app = TestApp::new();
    app.favourites.fail_writes();
    let store = create(&app);
    let mut states = store.states();
    next_matching(&mut states, is_loaded).await;
    // Let the initial favourite status land before toggling.
    settle().await;

    store.accept(DetailsIntent::ClickChangeFavouriteStatus);

    let state = next_matching(&mut states, |s| s.favourite_error.is_some()).await;
    assert!(!state.is_favourite);
    assert!(state.favourite_error.unwrap().contains("disk full"));
}

#[tokio::test]
async fn retrying_toggle_clears_previous_error() {
    let app = TestApp::new();
    app.favourites.fail_writes();
    let store = create(&app);
    let mut states = store.states();
    next_matching(&mut states, is_loaded).await;
    settle().await;

    store.accept(DetailsIntent::ClickChangeFavouriteStatus);
    next_matching(&mut states, |s| s.favourite_error.is_some()).await;

    app.favourites.heal_writes();
    store.accept(DetailsIntent::ClickChangeFavouriteStatus);
    next_matching(&mut states, |s| s.favourite_error.is_none()).await;
    let state = next_matching(&mut states, |s| s.is_favourite).await;
    assert_eq!(state.favourite_error, None);
    assert_eq!(app.favourites.cities(), vec![oslo()]);
}

#[tokio::test]
async fn back_publishes_label() {
    let app = TestApp::new();
    let store = create(&app);
    let mut labels = store.labels();

    store.accept(DetailsIntent::ClickBack);

    assert_eq!(within("label", labels.recv()).await, Some(DetailsLabel::ClickBack));
}

#[tokio::test]
async fn dispose_cancels_pending_forecast() {
    let app = TestApp::new();
    let gate = app.weather.gate(oslo().id);
    let store = create(&app);
    let mut states = store.states();
    next_matching(&mut states, |s| s.forecast_phase == ForecastPhase::Loading).await;

    store.dispose();
    gate.notify_one();
    settle().await;

    assert_eq!(store.state().forecast_phase, ForecastPhase::Loading);
}
