//! Inputs and outputs of the search store.

use serde::{Deserialize, Serialize};

use crate::domain::City;
use crate::mvi::{Action, Intent, Label};

/// Why the search screen was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpenReason {
    /// Tapping a result opens its forecast.
    RegularSearch,
    /// Tapping a result adds it to favourites and closes the screen.
    AddToFavourite,
}

/// User actions on the search screen.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchIntent {
    /// Query text edited.
    ChangeSearchQuery(String),

    /// Back button pressed.
    ClickBack,

    /// Submit the current query.
    ClickSearch,

    /// A result was tapped.
    ClickCity(City),
}

impl Intent for SearchIntent {}

/// The search store has no bootstrap work.
#[derive(Debug)]
pub enum SearchAction {}

impl Action for SearchAction {}

/// One-shot events for the owner of the search screen.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchLabel {
    ClickBack,

    /// Show the forecast for the tapped city.
    OpenForecast(City),

    /// The tapped city was added to favourites.
    SavedToFavourite,
}

impl Label for SearchLabel {}
