//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, Location, MIN_QUERY_LEN};

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Weather actions =====
        Action::WeatherFetch => match load_forecast(state) {
            Some(effect) => DispatchResult::changed_with(effect),
            None => DispatchResult::changed(),
        },

        Action::WeatherDidLoad { seq, weather } => {
            if seq != state.forecast_seq {
                tracing::debug!(seq, latest = state.forecast_seq, "dropping stale forecast");
                return DispatchResult::unchanged();
            }
            state.weather = Some(weather);
            state.loading = false;
            state.weather_error = None;
            DispatchResult::changed()
        }

        Action::WeatherDidError { seq, error } => {
            if seq != state.forecast_seq {
                tracing::debug!(seq, latest = state.forecast_seq, "dropping stale forecast error");
                return DispatchResult::unchanged();
            }
            // Keep the last good snapshot on screen.
            state.loading = false;
            state.weather_error = Some(error);
            DispatchResult::changed()
        }

        // ===== Search actions =====
        Action::SearchOpen => {
            state.search_active = true;
            state.search_query.clear();
            state.candidates.clear();
            state.search_error = None;
            state.search_selected = 0;
            DispatchResult::changed()
        }

        Action::SearchClose => {
            state.search_active = false;
            state.search_query.clear();
            state.candidates.clear();
            state.search_error = None;
            state.search_selected = 0;
            state.search_seq += 1;
            DispatchResult::changed_with(Effect::CancelSearch)
        }

        Action::SearchQueryChange(query) => {
            DispatchResult::changed_with(search_for(state, query, false))
        }

        Action::SearchQuerySubmit(query) => {
            DispatchResult::changed_with(search_for(state, query, true))
        }

        Action::SearchDidLoad { seq, results } => {
            if seq != state.search_seq {
                tracing::debug!(seq, latest = state.search_seq, "dropping stale search results");
                return DispatchResult::unchanged();
            }
            state.candidates = results;
            state.search_error = None;
            state.search_selected = 0;
            DispatchResult::changed()
        }

        Action::SearchDidError { seq, error } => {
            if seq != state.search_seq {
                return DispatchResult::unchanged();
            }
            state.candidates.clear();
            state.search_error = Some(error);
            state.search_selected = 0;
            DispatchResult::changed()
        }

        Action::SearchSelect(index) => {
            if index < state.candidates.len() && index != state.search_selected {
                state.search_selected = index;
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // ===== Location actions =====
        Action::LocationSelected(location) => select_location(state, location),

        // ===== Global actions =====
        Action::Render => DispatchResult::changed(),

        Action::Tick => {
            if state.loading {
                state.tick_count = state.tick_count.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Start a forecast request for `state.city`.
///
/// With no city there is nothing to request: loading ends with an error
/// instead of spinning forever.
fn load_forecast(state: &mut AppState) -> Option<Effect> {
    let city = state.city.trim();
    if city.is_empty() {
        state.loading = false;
        state.weather_error = Some("No city selected".into());
        return None;
    }
    let city = city.to_string();

    state.forecast_seq += 1;
    state.loading = true;
    state.weather_error = None;
    state.tick_count = 0;
    Some(Effect::FetchForecast {
        seq: state.forecast_seq,
        city,
        days: state.forecast_days,
    })
}

/// Record the query and decide whether it is long enough to look up.
fn search_for(state: &mut AppState, query: String, immediate: bool) -> Effect {
    state.search_seq += 1;
    state.search_selected = 0;
    state.search_error = None;
    state.search_query = query;

    if state.search_query.chars().count() <= MIN_QUERY_LEN {
        state.candidates.clear();
        return Effect::CancelSearch;
    }

    Effect::SearchLocations {
        seq: state.search_seq,
        query: state.search_query.clone(),
        immediate,
    }
}

fn select_location(state: &mut AppState, location: Location) -> DispatchResult<Effect> {
    state.candidates.clear();
    state.search_active = false;
    state.search_query.clear();
    state.search_error = None;
    state.search_selected = 0;
    // Any search still in flight belongs to the closed panel.
    state.search_seq += 1;

    state.city = location.name;
    let mut effects = vec![Effect::CancelSearch];
    effects.extend(load_forecast(state));
    DispatchResult::changed_with_many(effects)
}
