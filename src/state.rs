//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// City shown before the user picks one.
pub const DEFAULT_CITY: &str = "Sri Lanka";

/// Forecast horizon requested from the API.
pub const FORECAST_DAYS: u8 = 7;

/// Queries at or below this many characters never hit the search endpoint.
pub const MIN_QUERY_LEN: usize = 2;

/// Spinner frame interval while a forecast is loading.
pub const LOADING_TICK_MS: u64 = 80;

// ============================================================================
// Data model (WeatherAPI.com shapes)
// ============================================================================

/// A search candidate returned by the location lookup.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Location {
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lon: f64,
}

impl Location {
    /// "London, United Kingdom" style label for the picklist.
    pub fn label(&self) -> String {
        if self.country.is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, self.country)
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Condition {
    pub text: String,
}

/// Where the snapshot was taken, as reported by the forecast endpoint.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LocationInfo {
    pub name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub localtime: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CurrentConditions {
    pub temp_c: f32,
    pub humidity: u8,
    pub wind_kph: f32,
    pub condition: Condition,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Astro {
    pub sunrise: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DaySummary {
    pub avgtemp_c: f32,
    pub condition: Condition,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ForecastDay {
    pub date: String,
    pub astro: Astro,
    pub day: DaySummary,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Forecast {
    #[serde(default)]
    pub forecastday: Vec<ForecastDay>,
}

/// Current conditions plus the daily forecast, replaced wholesale on each fetch.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherSnapshot {
    pub location: LocationInfo,
    pub current: CurrentConditions,
    #[serde(default)]
    pub forecast: Forecast,
}

impl WeatherSnapshot {
    pub fn today(&self) -> Option<&ForecastDay> {
        self.forecast.forecastday.first()
    }
}

// ============================================================================
// App state
// ============================================================================

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    // --- Forecast ---
    /// City of the most recent forecast request
    #[debug(section = "Weather", label = "City")]
    pub city: String,

    /// Last successfully loaded snapshot (kept across failed fetches)
    #[debug(section = "Weather", label = "Snapshot", debug_fmt)]
    pub weather: Option<WeatherSnapshot>,

    /// A forecast request is outstanding
    #[debug(section = "Weather", label = "Loading")]
    pub loading: bool,

    /// Message from the last failed forecast fetch
    #[debug(section = "Weather", label = "Error", debug_fmt)]
    pub weather_error: Option<String>,

    /// Generation of the latest forecast request
    #[debug(section = "Weather", label = "Request #")]
    pub forecast_seq: u64,

    /// Forecast horizon in days
    #[debug(section = "Weather", label = "Days")]
    pub forecast_days: u8,

    // --- Search ---
    #[debug(section = "Search", label = "Active")]
    pub search_active: bool,

    #[debug(section = "Search", label = "Query", debug_fmt)]
    pub search_query: String,

    /// Matches from the location lookup
    #[debug(section = "Search", label = "Candidates", debug_fmt)]
    pub candidates: Vec<Location>,

    /// Highlighted index in `candidates`
    #[debug(skip)]
    pub search_selected: usize,

    #[debug(skip)]
    pub search_error: Option<String>,

    /// Generation of the latest search request
    #[debug(section = "Search", label = "Request #")]
    pub search_seq: u64,

    // --- Animation internals (skipped) ---
    #[debug(skip)]
    pub tick_count: u32,
}

impl AppState {
    /// Fresh screen for `city`; loading until the first forecast lands.
    pub fn new(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            weather: None,
            loading: true,
            weather_error: None,
            forecast_seq: 0,
            forecast_days: FORECAST_DAYS,
            search_active: false,
            search_query: String::new(),
            candidates: Vec::new(),
            search_selected: 0,
            search_error: None,
            search_seq: 0,
            tick_count: 0,
        }
    }

    pub fn selected_candidate(&self) -> Option<&Location> {
        self.candidates.get(self.search_selected)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_CITY)
    }
}
