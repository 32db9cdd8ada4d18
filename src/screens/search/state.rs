//! State for the search screen.

use crate::domain::City;
use crate::mvi::UiState;

/// Progress of the last submitted search.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchPhase {
    /// Nothing submitted yet.
    #[default]
    Initial,

    /// A search is in flight.
    Searching,

    /// The search (or saving the picked city) failed.
    Error,

    /// The search succeeded with no matches.
    EmptyResult,

    /// The search succeeded; never empty.
    Searched(Vec<City>),
}

/// Search screen state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchState {
    pub query: String,
    pub phase: SearchPhase,
}

impl UiState for SearchState {}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Results of the last successful search, empty otherwise.
    pub fn results(&self) -> &[City] {
        match &self.phase {
            SearchPhase::Searched(cities) => cities,
            _ => &[],
        }
    }

    pub fn is_searching(&self) -> bool {
        matches!(self.phase, SearchPhase::Searching)
    }

    /// True once the last search finished, successfully or not.
    pub fn is_settled(&self) -> bool {
        matches!(
            self.phase,
            SearchPhase::Error | SearchPhase::EmptyResult | SearchPhase::Searched(_)
        )
    }
}
