//! Actions: user intents and async results

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::{Location, WeatherSnapshot};

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Weather category =====
    /// Intent: load the forecast for the current city (initial load and retry)
    WeatherFetch,

    /// Result: forecast loaded for request `seq`
    WeatherDidLoad { seq: u64, weather: WeatherSnapshot },

    /// Result: forecast request `seq` failed
    WeatherDidError { seq: u64, error: String },

    // ===== Search category =====
    /// Open the city search panel
    SearchOpen,

    /// Close the search panel (cancel)
    SearchClose,

    /// Search text changed (debounced lookup)
    SearchQueryChange(String),

    /// Enter pressed with no candidates - look up right away
    SearchQuerySubmit(String),

    /// Result: candidates for search request `seq`
    SearchDidLoad { seq: u64, results: Vec<Location> },

    /// Result: search request `seq` failed
    SearchDidError { seq: u64, error: String },

    /// Highlight a candidate (by index)
    SearchSelect(usize),

    // ===== Location category =====
    /// A candidate was chosen - switch the screen to it
    LocationSelected(Location),

    // ===== Uncategorized (global) =====
    /// Force a re-render (for cursor movement, etc.)
    Render,

    /// Spinner frame while loading
    Tick,

    /// Exit the application
    Quit,
}
