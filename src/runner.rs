//! Effect runner - turns reducer effects into keyed async tasks

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};
use tui_dispatch::{TaskKey, TaskManager};

use crate::action::Action;
use crate::api::WeatherService;
use crate::effect::Effect;

/// Task key for forecast requests; a new request replaces the one in flight.
pub const FORECAST_TASK: &str = "forecast";

/// Task key shared by every location lookup, debounced or not.
pub const SEARCH_TASK: &str = "location_search";

#[derive(Clone)]
pub struct EffectRunner {
    service: Arc<dyn WeatherService>,
    search_debounce: Duration,
}

impl EffectRunner {
    pub fn new(service: Arc<dyn WeatherService>, search_debounce: Duration) -> Self {
        Self {
            service,
            search_debounce,
        }
    }

    pub fn run(&self, effect: Effect, tasks: &mut TaskManager<Action>) {
        match effect {
            Effect::FetchForecast { seq, city, days } => {
                let service = Arc::clone(&self.service);
                tasks.spawn(FORECAST_TASK, async move {
                    match service.forecast(&city, days).await {
                        Ok(weather) => {
                            debug!(seq, %city, "forecast loaded");
                            Action::WeatherDidLoad { seq, weather }
                        }
                        Err(e) => {
                            warn!(seq, %city, error = %e, "forecast failed");
                            Action::WeatherDidError {
                                seq,
                                error: e.to_string(),
                            }
                        }
                    }
                });
            }
            Effect::SearchLocations {
                seq,
                query,
                immediate,
            } => {
                let service = Arc::clone(&self.service);
                let lookup = async move {
                    match service.search_locations(&query).await {
                        Ok(results) => {
                            debug!(seq, %query, count = results.len(), "search results");
                            Action::SearchDidLoad { seq, results }
                        }
                        Err(e) => {
                            warn!(seq, %query, error = %e, "search failed");
                            Action::SearchDidError {
                                seq,
                                error: e.to_string(),
                            }
                        }
                    }
                };
                if immediate {
                    tasks.spawn(SEARCH_TASK, lookup);
                } else {
                    // Each keystroke restarts the quiet period.
                    tasks.debounce(SEARCH_TASK, self.search_debounce, lookup);
                }
            }
            Effect::CancelSearch => {
                tasks.cancel(&TaskKey::new(SEARCH_TASK));
            }
        }
    }
}
