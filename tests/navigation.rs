//! Back stack behaviour through the root component.

mod common;

use common::*;
use weather_app::domain::FavouriteRepository;
use weather_app::navigation::{NavConfig, NavigationError};
use weather_app::registry::InstanceKey;
use weather_app::screens::details::{DetailsComponent, ForecastPhase};
use weather_app::screens::favourite::{FavouriteComponent, FavouriteStore};
use weather_app::screens::search::{OpenReason, SearchComponent, SearchPhase};
use weather_app::screens::{Child, Config, RootComponent};

fn root(app: &TestApp) -> RootComponent {
    RootComponent::new(app.deps()).unwrap()
}

fn favourite(root: &RootComponent) -> FavouriteComponent {
    match root.active_child() {
        Child::Favourite(component) => component,
        _ => panic!("expected favourites on top"),
    }
}

fn search(root: &RootComponent) -> SearchComponent {
    match root.active_child() {
        Child::Search(component) => component,
        _ => panic!("expected search on top"),
    }
}

fn details(root: &RootComponent) -> DetailsComponent {
    match root.active_child() {
        Child::Details(component) => component,
        _ => panic!("expected details on top"),
    }
}

/// Wait until the stack holds exactly `configs`.
async fn wait_for_stack(root: &RootComponent, configs: Vec<Config>) {
    let mut snapshots = root.stack().subscribe();
    within("stack", async {
        while snapshots.borrow_and_update().configs != configs {
            snapshots.changed().await.unwrap();
        }
    })
    .await;
}

#[tokio::test]
async fn starts_at_favourites_and_never_pops_root() {
    let app = TestApp::new();
    let root = root(&app);

    assert_eq!(root.stack().configs(), vec![Config::Favourite]);
    assert!(!root.stack().pop());
    assert!(!root.handle_back());
    assert_eq!(root.stack().depth(), 1);
    assert_eq!(root.stack().active_config(), Config::Favourite);
}

#[tokio::test]
async fn favourites_labels_push_screens() {
    let app = TestApp::new();
    let root = root(&app);

    favourite(&root).on_click_search();
    wait_for_stack(&root, vec![Config::Favourite, Config::Search(OpenReason::RegularSearch)]).await;
    assert!(root.handle_back());

    favourite(&root).on_click_add_favourite();
    wait_for_stack(&root, vec![Config::Favourite, Config::Search(OpenReason::AddToFavourite)]).await;
    assert!(root.handle_back());

    favourite(&root).on_city_item_click(oslo());
    wait_for_stack(&root, vec![Config::Favourite, Config::Details(oslo())]).await;
}

#[tokio::test]
async fn search_result_opens_details_and_back_returns() {
    let app = TestApp::new();
    let root = root(&app);
    favourite(&root).on_click_search();
    wait_for_stack(&root, vec![Config::Favourite, Config::Search(OpenReason::RegularSearch)]).await;

    let screen = search(&root);
    let mut model = screen.model();
    screen.change_search_query("Lon");
    screen.on_click_search();
    let state = next_matching(&mut model, |s| s.is_settled()).await;
    assert_eq!(state.phase, SearchPhase::Searched(vec![london()]));

    screen.on_click_city(london());
    let expected = vec![
        Config::Favourite,
        Config::Search(OpenReason::RegularSearch),
        Config::Details(london()),
    ];
    wait_for_stack(&root, expected).await;

    details(&root).on_click_back();
    wait_for_stack(&root, vec![Config::Favourite, Config::Search(OpenReason::RegularSearch)]).await;
    // The search screen kept its results.
    assert_eq!(search(&root).state().results(), &[london()]);
}

#[tokio::test]
async fn adding_from_search_saves_and_closes_it() {
    let app = TestApp::new();
    let root = root(&app);
    favourite(&root).on_click_add_favourite();
    wait_for_stack(&root, vec![Config::Favourite, Config::Search(OpenReason::AddToFavourite)]).await;

    search(&root).on_click_city(oslo());
    wait_for_stack(&root, vec![Config::Favourite]).await;
    assert_eq!(app.favourites.cities(), vec![oslo()]);

    let mut model = favourite(&root).model();
    next_matching(&mut model, |s| s.city_items.len() == 1 && s.is_settled()).await;
}

#[tokio::test]
async fn pop_disposes_the_store_and_cancels_its_work() {
    let app = TestApp::new();
    let gate = app.weather.gate(oslo().id);
    let root = root(&app);

    root.stack().push(Config::Details(oslo())).unwrap();
    let store = details(&root).store().clone();
    let mut states = store.states();
    next_matching(&mut states, |s| s.forecast_phase == ForecastPhase::Loading).await;
    let key = InstanceKey::for_child(&Config::Details(oslo()).key(), 1);
    assert!(root.registry().contains(&key));

    assert!(root.stack().pop());
    assert_eq!(root.stack().active_config(), Config::Favourite);
    assert!(store.is_disposed());
    assert!(!root.registry().contains(&key));

    gate.notify_one();
    settle().await;
    assert_eq!(store.state().forecast_phase, ForecastPhase::Loading);
}

#[tokio::test]
async fn recreating_children_keeps_stores_and_label_wiring() {
    let app = TestApp::new();
    let root = root(&app);
    root.stack().push(Config::Details(oslo())).unwrap();
    let favourite_before = favourite_store_id(&root);
    let details_before = details(&root).store().clone();

    root.stack().recreate_children().unwrap();

    let details_after = details(&root);
    assert!(details_after.store().same_store(&details_before));
    assert!(!details_before.is_disposed());
    assert_eq!(favourite_store_id(&root), favourite_before);
    assert_eq!(root.registry().len(), 2);

    // The rebuilt component still navigates.
    details_after.on_click_back();
    wait_for_stack(&root, vec![Config::Favourite]).await;
    assert!(details_before.is_disposed());
}

/// Id of the retained favourites store at the bottom of the stack.
fn favourite_store_id(root: &RootComponent) -> uuid::Uuid {
    let key = InstanceKey::for_child(&Config::Favourite.key(), 0);
    let store: FavouriteStore = root
        .registry()
        .get_or_create(&key, || panic!("favourites store should be retained"))
        .unwrap();
    store.id()
}

#[tokio::test]
async fn same_screen_twice_gets_separate_stores() {
    let app = TestApp::new();
    let root = root(&app);
    root.stack().push(Config::Details(oslo())).unwrap();
    let first = details(&root).store().clone();
    root.stack().push(Config::Details(oslo())).unwrap();
    let second = details(&root).store().clone();

    assert!(!first.same_store(&second));
    assert!(root.stack().pop());
    assert!(second.is_disposed());
    assert!(!first.is_disposed());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn push_racing_a_pop_binds_a_live_store() {
    let app = TestApp::new();
    let root = root(&app);
    let navigation = root.stack().navigation();

    for _ in 0..200 {
        root.stack().push(Config::Details(oslo())).unwrap();
        let mut snapshots = root.stack().subscribe();
        let racer = navigation.clone();
        // Re-push the same screen the moment the pop becomes visible.
        let pusher = tokio::spawn(async move {
            while snapshots.borrow_and_update().depth() != 1 {
                snapshots.changed().await.unwrap();
            }
            racer.push(Config::Details(oslo())).unwrap();
        });

        assert!(root.stack().pop());
        within("racing push", pusher).await.unwrap();

        assert_eq!(root.stack().depth(), 2);
        assert!(!details(&root).store().is_disposed());
        assert!(root.stack().pop());
    }
    assert_eq!(root.registry().len(), 1);
}

#[tokio::test]
async fn saved_stack_restores() {
    let app = TestApp::new();
    let root = root(&app);
    root.stack().push(Config::Search(OpenReason::AddToFavourite)).unwrap();
    root.stack().push(Config::Details(rome())).unwrap();
    let saved = root.save().unwrap();
    let configs = root.stack().configs();
    drop(root);

    let restored = RootComponent::restore(&saved, app.deps()).unwrap();
    assert_eq!(restored.stack().configs(), configs);
    assert_eq!(restored.registry().len(), 3);

    let mut model = details(&restored).model();
    next_matching(&mut model, |s| matches!(s.forecast_phase, ForecastPhase::Loaded(_))).await;
}

#[tokio::test]
async fn restoring_an_empty_stack_fails() {
    let app = TestApp::new();
    let result = RootComponent::restore("[]", app.deps());
    assert!(matches!(result, Err(NavigationError::EmptyStack)));

    let result = RootComponent::restore("not json", app.deps());
    assert!(matches!(result, Err(NavigationError::Serialization(_))));
}

#[tokio::test]
async fn dropping_root_disposes_every_store() {
    let app = TestApp::new();
    let root = root(&app);
    root.stack().push(Config::Details(oslo())).unwrap();
    let details_store = details(&root).store().clone();
    let registry = root.registry().clone();
    assert_eq!(registry.len(), 2);

    drop(root);

    assert!(details_store.is_disposed());
    assert!(registry.is_empty());
}

#[tokio::test]
async fn snapshot_stream_follows_push_and_pop() {
    let app = TestApp::new();
    app.favourites.add_to_favourite(rome()).await.unwrap();
    let root = root(&app);
    let mut snapshots = root.stack().subscribe();

    root.stack().push(Config::Details(rome())).unwrap();
    within("push", snapshots.changed()).await.unwrap();
    assert_eq!(snapshots.borrow_and_update().depth(), 2);

    root.stack().pop();
    within("pop", snapshots.changed()).await.unwrap();
    let snapshot = snapshots.borrow_and_update().clone();
    assert_eq!(snapshot.active(), Some(&Config::Favourite));
}
