//! Bootstrapper for the favourites screen.

use std::sync::Arc;

use futures::StreamExt;

use crate::domain::FavouriteRepository;
use crate::mvi::{BootstrapContext, Bootstrapper};

use super::intent::FavouriteAction;

/// Follows the favourites list for the lifetime of the store.
pub struct FavouriteBootstrapper {
    favourites: Arc<dyn FavouriteRepository>,
}

impl FavouriteBootstrapper {
    pub fn new(favourites: Arc<dyn FavouriteRepository>) -> Self {
        Self { favourites }
    }
}

impl Bootstrapper for FavouriteBootstrapper {
    type Action = FavouriteAction;

    fn invoke(&mut self, ctx: &BootstrapContext<FavouriteAction>) {
        let mut cities = self.favourites.favourite_cities();
        ctx.launch(move |ctx| async move {
            while let Some(list) = cities.next().await {
                ctx.dispatch(FavouriteAction::FavouriteCitiesLoaded(list));
            }
        });
    }
}
