//! Inputs and outputs of the favourites store.

use crate::domain::City;
use crate::mvi::{Action, Intent, Label};

#[derive(Debug, Clone, PartialEq)]
pub enum FavouriteIntent {
    /// Open a regular search.
    ClickSearch,

    /// Open a search that adds the picked city to favourites.
    ClickAddFavourite,

    CityItemClick(City),
}

impl Intent for FavouriteIntent {}

#[derive(Debug, Clone, PartialEq)]
pub enum FavouriteAction {
    /// Full favourites list; sent on start and on every change.
    FavouriteCitiesLoaded(Vec<City>),
}

impl Action for FavouriteAction {}

#[derive(Debug, Clone, PartialEq)]
pub enum FavouriteLabel {
    ClickSearch,
    ClickToFavourite,
    CityItemClick(City),
}

impl Label for FavouriteLabel {}
