//! Tests using EffectStoreTestHarness
//!
//! Store, component and render testing combined: keys go through the
//! components, effects are asserted, and async completions are fed back
//! as actions.

use forecast::{
    action::Action,
    components::{Component, WeatherDisplay, WeatherDisplayProps},
    effect::Effect,
    images::ImageTable,
    reducer::reducer,
    state::{AppState, Condition, CurrentConditions, Location, LocationInfo, WeatherSnapshot},
    theme::Theme,
};
use tui_dispatch::NumericComponentId;
use tui_dispatch::testing::*;

fn mock_weather(city: &str) -> WeatherSnapshot {
    WeatherSnapshot {
        location: LocationInfo {
            name: city.into(),
            country: "United Kingdom".into(),
            ..Default::default()
        },
        current: CurrentConditions {
            temp_c: 12.0,
            humidity: 70,
            wind_kph: 15.1,
            condition: Condition {
                text: "Overcast".into(),
            },
        },
        ..Default::default()
    }
}

fn london() -> Location {
    Location {
        name: "London".into(),
        country: "UK".into(),
        ..Default::default()
    }
}

// ============================================================================
// Forecast flow
// ============================================================================

#[test]
fn test_forecast_fetch_flow_with_harness() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::WeatherFetch);
    harness.assert_state(|s| s.loading);

    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(
        |e| matches!(e, Effect::FetchForecast { seq: 1, city, days: 7 } if city == "Sri Lanka"),
    );

    harness.complete_action(Action::WeatherDidLoad {
        seq: 1,
        weather: mock_weather("Colombo"),
    });
    let (changed, total) = harness.process_emitted();

    assert_eq!(total, 1, "Should have processed 1 action");
    assert_eq!(changed, 1, "Action should have changed state");

    harness.assert_state(|s| !s.loading);
    harness.assert_state(|s| s.weather_error.is_none());
    harness.assert_state(|s| {
        s.weather
            .as_ref()
            .is_some_and(|w| w.current.condition.text == "Overcast")
    });
}

#[test]
fn test_forecast_error_flow() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::WeatherFetch);
    harness.complete_action(Action::WeatherDidError {
        seq: 1,
        error: "request failed: timed out".into(),
    });
    harness.process_emitted();

    harness.assert_state(|s| !s.loading);
    harness.assert_state(|s| s.weather.is_none());
    harness.assert_state(|s| s.weather_error.as_deref() == Some("request failed: timed out"));
}

#[test]
fn test_retry_after_error_clears_it() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::WeatherFetch);
    harness.complete_action(Action::WeatherDidError {
        seq: 1,
        error: "boom".into(),
    });
    harness.process_emitted();

    harness.dispatch_collect(Action::WeatherFetch);
    harness.assert_state(|s| s.loading && s.weather_error.is_none());

    let effects = harness.drain_effects();
    effects.effects_all_match(|e| matches!(e, Effect::FetchForecast { seq: 2, .. }));
}

// ============================================================================
// Search flow
// ============================================================================

#[test]
fn test_search_pick_and_load() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::SearchOpen);
    harness.dispatch_collect(Action::SearchQueryChange("Lon".into()));
    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| {
        matches!(e, Effect::SearchLocations { query, immediate: false, .. } if query == "Lon")
    });

    harness.complete_action(Action::SearchDidLoad {
        seq: 1,
        results: vec![london()],
    });
    harness.process_emitted();
    harness.assert_state(|s| s.candidates.len() == 1);

    harness.dispatch_collect(Action::LocationSelected(london()));
    harness.assert_state(|s| s.loading && s.candidates.is_empty() && !s.search_active);
    let effects = harness.drain_effects();
    effects.effects_count(2);
    effects.effects_first_matches(|e| matches!(e, Effect::CancelSearch));
    effects.effects_none_match(|e| matches!(e, Effect::SearchLocations { .. }));

    harness.complete_action(Action::WeatherDidLoad {
        seq: 1,
        weather: mock_weather("London"),
    });
    harness.process_emitted();
    harness.assert_state(|s| !s.loading);
    harness.assert_state(|s| {
        s.weather
            .as_ref()
            .is_some_and(|w| w.location.name == "London")
    });
}

#[test]
fn test_submit_searches_immediately() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::SearchOpen);
    harness.dispatch_collect(Action::SearchQuerySubmit("Paris".into()));

    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(
        |e| matches!(e, Effect::SearchLocations { query, immediate: true, .. } if query == "Paris"),
    );
}

#[test]
fn test_results_after_close_are_dropped() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::SearchOpen);
    harness.dispatch_collect(Action::SearchQueryChange("Lon".into()));
    harness.dispatch_collect(Action::SearchClose);

    let effects = harness.drain_effects();
    effects.effects_count(2);

    harness.complete_action(Action::SearchDidLoad {
        seq: 1,
        results: vec![london()],
    });
    let (changed, total) = harness.process_emitted();
    assert_eq!((changed, total), (0, 1));
    harness.assert_state(|s| s.candidates.is_empty() && !s.search_active);
}

#[test]
fn test_search_error_is_shown_and_cleared_by_typing() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::SearchOpen);
    harness.dispatch_collect(Action::SearchQueryChange("Lon".into()));
    harness.complete_action(Action::SearchDidError {
        seq: 1,
        error: "request failed".into(),
    });
    harness.process_emitted();
    harness.assert_state(|s| s.search_error.as_deref() == Some("request failed"));

    harness.dispatch_collect(Action::SearchQueryChange("Lond".into()));
    harness.assert_state(|s| s.search_error.is_none());
}

#[test]
fn test_dispatch_all_selection() {
    let mut harness = EffectStoreTestHarness::new(
        AppState {
            search_active: true,
            candidates: vec![london(), Location {
                name: "Londrina".into(),
                country: "Brazil".into(),
                ..Default::default()
            }],
            ..Default::default()
        },
        reducer,
    );

    let results = harness.dispatch_all([
        Action::SearchSelect(1),
        Action::SearchSelect(1),
        Action::SearchSelect(5),
    ]);

    // Re-selecting or selecting out of range changes nothing
    assert_eq!(results, vec![true, false, false]);
    harness.assert_state(|s| s.selected_candidate().is_some_and(|l| l.name == "Londrina"));
}

// ============================================================================
// Component + store integration
// ============================================================================

#[test]
fn test_keyboard_triggers_fetch() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    let mut component = WeatherDisplay;
    let theme = Theme::default();
    let images = ImageTable::default();

    let actions = harness.send_keys::<NumericComponentId, _, _>("r", |state, event| {
        let props = WeatherDisplayProps {
            state,
            theme: &theme,
            images: &images,
            is_focused: true,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    actions.assert_count(1);
    actions.assert_first(Action::WeatherFetch);

    harness.dispatch_collect(Action::WeatherFetch);
    harness.assert_state(|s| s.loading);

    let effects = harness.drain_effects();
    effects.effects_first_matches(|e| matches!(e, Effect::FetchForecast { .. }));
}

#[test]
fn test_keyboard_opens_search() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    let mut component = WeatherDisplay;
    let theme = Theme::default();
    let images = ImageTable::default();

    let actions = harness.send_keys::<NumericComponentId, _, _>("/", |state, event| {
        let props = WeatherDisplayProps {
            state,
            theme: &theme,
            images: &images,
            is_focused: true,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    for action in actions {
        harness.dispatch_collect(action);
    }

    harness.assert_state(|s| s.search_active);
}

// ============================================================================
// Render with harness
// ============================================================================

#[test]
fn test_render_after_load() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    let mut component = WeatherDisplay;
    let theme = Theme::default();
    let images = ImageTable::default();

    harness.dispatch_collect(Action::WeatherFetch);
    let loading = harness.render_plain(60, 24, |frame, area, state| {
        let props = WeatherDisplayProps {
            state,
            theme: &theme,
            images: &images,
            is_focused: true,
        };
        component.render(frame, area, props);
    });
    assert!(loading.contains("Loading"), "Should show loading:\n{loading}");

    harness.complete_action(Action::WeatherDidLoad {
        seq: 1,
        weather: mock_weather("London"),
    });
    harness.process_emitted();

    let output = harness.render_plain(80, 40, |frame, area, state| {
        let props = WeatherDisplayProps {
            state,
            theme: &theme,
            images: &images,
            is_focused: true,
        };
        component.render(frame, area, props);
    });
    assert!(output.contains("Overcast"), "Should show condition:\n{output}");
    assert!(output.contains("70%"));
}

// ============================================================================
// Effect assertions
// ============================================================================

#[test]
fn test_effect_assertions() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    let effects = harness.drain_effects();
    effects.effects_empty();

    harness.dispatch_collect(Action::WeatherFetch);
    let effects = harness.drain_effects();
    effects.effects_not_empty();
    effects.effects_count(1);
    effects.effects_all_match(|e| matches!(e, Effect::FetchForecast { .. }));
    effects.effects_none_match(|e| matches!(e, Effect::SearchLocations { .. }));
}

#[test]
fn test_tick_animates_only_while_loading() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.complete_action(Action::Tick);
    harness.complete_action(Action::Tick);
    let (changed, _) = harness.process_emitted();
    assert_eq!(changed, 2);

    harness.complete_action(Action::WeatherDidLoad {
        seq: 0,
        weather: mock_weather("Colombo"),
    });
    harness.complete_action(Action::Tick);
    let (changed, total) = harness.process_emitted();
    assert_eq!(total, 2);
    assert_eq!(changed, 1, "Tick after load is a no-op");
}
