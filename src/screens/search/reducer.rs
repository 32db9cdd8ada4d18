//! Reducer for the search screen.

use crate::domain::City;
use crate::mvi::{Message, Reducer};

use super::state::{SearchPhase, SearchState};

/// State deltas produced by the search executor.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchMsg {
    ChangeSearchQuery(String),
    LoadingSearchResult,
    SearchResultLoaded(Vec<City>),
    ErrorLoadingSearchResult,
    /// Adding the picked city to favourites failed.
    ErrorSaving,
}

impl Message for SearchMsg {}

/// Reducer for search state transitions.
pub struct SearchReducer;

impl Reducer for SearchReducer {
    type State = SearchState;
    type Message = SearchMsg;

    fn reduce(state: Self::State, message: Self::Message) -> Self::State {
        match message {
            SearchMsg::ChangeSearchQuery(query) => SearchState { query, ..state },
            SearchMsg::LoadingSearchResult => SearchState {
                phase: SearchPhase::Searching,
                ..state
            },
            SearchMsg::SearchResultLoaded(cities) => {
                let phase = if cities.is_empty() {
                    SearchPhase::EmptyResult
                } else {
                    SearchPhase::Searched(cities)
                };
                SearchState { phase, ..state }
            }
            SearchMsg::ErrorLoadingSearchResult | SearchMsg::ErrorSaving => SearchState {
                phase: SearchPhase::Error,
                ..state
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn london() -> City {
        City::new(1, "London", "UK")
    }

    #[test]
    fn query_change_keeps_phase() {
        let state = SearchState {
            query: "Lo".into(),
            phase: SearchPhase::Searched(vec![london()]),
        };
        let next = SearchReducer::reduce(state, SearchMsg::ChangeSearchQuery("Lon".into()));
        assert_eq!(next.query, "Lon");
        assert_eq!(next.phase, SearchPhase::Searched(vec![london()]));
    }

    #[test]
    fn empty_result_only_for_empty_list() {
        let state = SearchReducer::reduce(SearchState::new(), SearchMsg::SearchResultLoaded(vec![]));
        assert_eq!(state.phase, SearchPhase::EmptyResult);

        let state = SearchReducer::reduce(state, SearchMsg::SearchResultLoaded(vec![london()]));
        assert_eq!(state.phase, SearchPhase::Searched(vec![london()]));
    }

    #[test]
    fn errors_move_to_error_phase() {
        for msg in [SearchMsg::ErrorLoadingSearchResult, SearchMsg::ErrorSaving] {
            let state = SearchReducer::reduce(SearchState::new(), msg);
            assert_eq!(state.phase, SearchPhase::Error);
        }
    }

    #[test]
    fn reduce_is_deterministic() {
        let state = SearchState {
            query: "Paris".into(),
            phase: SearchPhase::Searching,
        };
        let msg = SearchMsg::SearchResultLoaded(vec![london()]);
        assert_eq!(
            SearchReducer::reduce(state.clone(), msg.clone()),
            SearchReducer::reduce(state, msg)
        );
    }

    #[test]
    fn replay_folds_in_order() {
        let history = vec![
            SearchMsg::ChangeSearchQuery("Lon".into()),
            SearchMsg::LoadingSearchResult,
            SearchMsg::SearchResultLoaded(vec![london()]),
        ];
        let state = SearchReducer::replay(SearchState::new(), history);
        assert_eq!(state.query, "Lon");
        assert_eq!(state.results(), &[london()]);
    }
}
