//! Root component: the back stack of screens and the label wiring between them.

use serde::{Deserialize, Serialize};

use crate::app::AppDependencies;
use crate::domain::City;
use crate::navigation::{
    ChildFactory, ChildStack, ComponentContext, NavConfig, NavigationError, StackNavigation,
};
use crate::registry::StoreRegistry;

use super::details::{DetailsComponent, DetailsLabel};
use super::favourite::{FavouriteComponent, FavouriteLabel};
use super::search::{OpenReason, SearchComponent, SearchLabel};

/// Screens the root can show, with their construction parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Config {
    Favourite,
    Search(OpenReason),
    Details(City),
}

impl NavConfig for Config {
    fn key(&self) -> String {
        match self {
            Config::Favourite => "favourite".to_string(),
            Config::Search(OpenReason::RegularSearch) => "search:regular".to_string(),
            Config::Search(OpenReason::AddToFavourite) => "search:add".to_string(),
            Config::Details(city) => format!("details:{}", city.id),
        }
    }
}

/// A live child component.
#[derive(Clone)]
pub enum Child {
    Favourite(FavouriteComponent),
    Search(SearchComponent),
    Details(DetailsComponent),
}

pub struct RootComponent {
    stack: ChildStack<Config, Child>,
    registry: StoreRegistry,
}

impl RootComponent {
    /// Root with the favourites screen at the bottom of the stack.
    pub fn new(deps: AppDependencies) -> Result<Self, NavigationError> {
        let registry = StoreRegistry::new();
        let stack = ChildStack::new(Config::Favourite, registry.clone(), child_factory(deps))?;
        Ok(Self { stack, registry })
    }

    /// Root rebuilt from [`RootComponent::save`] output.
    pub fn restore(saved: &str, deps: AppDependencies) -> Result<Self, NavigationError> {
        let registry = StoreRegistry::new();
        let stack = ChildStack::restore(saved, registry.clone(), child_factory(deps))?;
        Ok(Self { stack, registry })
    }

    pub fn stack(&self) -> &ChildStack<Config, Child> {
        &self.stack
    }

    pub fn registry(&self) -> &StoreRegistry {
        &self.registry
    }

    pub fn active_child(&self) -> Child {
        self.stack.current()
    }

    /// Returns `false` when the back press should go to the host.
    pub fn handle_back(&self) -> bool {
        self.stack.handle_back()
    }

    pub fn save(&self) -> Result<String, NavigationError> {
        self.stack.save()
    }
}

fn child_factory(deps: AppDependencies) -> ChildFactory<Config, Child> {
    Box::new(
        move |config: &Config, context: ComponentContext, navigation: StackNavigation<Config>| {
            create_child(config, &context, navigation, &deps)
        },
    )
}

fn create_child(
    config: &Config,
    context: &ComponentContext,
    navigation: StackNavigation<Config>,
    deps: &AppDependencies,
) -> Result<Child, NavigationError> {
    let child = match config {
        Config::Favourite => {
            let component = FavouriteComponent::new(context, deps, move |label| match label {
                FavouriteLabel::ClickSearch => {
                    push(&navigation, Config::Search(OpenReason::RegularSearch))
                }
                FavouriteLabel::ClickToFavourite => {
                    push(&navigation, Config::Search(OpenReason::AddToFavourite))
                }
                FavouriteLabel::CityItemClick(city) => push(&navigation, Config::Details(city)),
            })?;
            Child::Favourite(component)
        }
        Config::Search(open_reason) => {
            let component = SearchComponent::new(context, deps, *open_reason, move |label| {
                match label {
                    SearchLabel::ClickBack | SearchLabel::SavedToFavourite => {
                        navigation.pop();
                    }
                    SearchLabel::OpenForecast(city) => push(&navigation, Config::Details(city)),
                }
            })?;
            Child::Search(component)
        }
        Config::Details(city) => {
            let component =
                DetailsComponent::new(context, deps, city.clone(), move |label| match label {
                    DetailsLabel::ClickBack => {
                        navigation.pop();
                    }
                })?;
            Child::Details(component)
        }
    };
    Ok(child)
}

fn push(navigation: &StackNavigation<Config>, config: Config) {
    if let Err(err) = navigation.push(config) {
        tracing::warn!(error = %err, "Navigation push failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_distinguish_configs() {
        let keys = [
            Config::Favourite.key(),
            Config::Search(OpenReason::RegularSearch).key(),
            Config::Search(OpenReason::AddToFavourite).key(),
            Config::Details(City::new(5, "Oslo", "Norway")).key(),
            Config::Details(City::new(6, "Oslo", "Norway")).key(),
        ];
        for (i, a) in keys.iter().enumerate() {
            for b in &keys[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn config_round_trips_through_json() {
        let configs = vec![
            Config::Favourite,
            Config::Search(OpenReason::AddToFavourite),
            Config::Details(City::new(5, "Oslo", "Norway")),
        ];
        let json = serde_json::to_string(&configs).unwrap();
        let restored: Vec<Config> = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, configs);
    }
}
