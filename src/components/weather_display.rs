use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Layout};
use ratatui::prelude::{Frame, Rect};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{Component, WeatherBody, WeatherBodyProps};
use crate::action::Action;
use crate::images::ImageTable;
use crate::state::AppState;
use crate::theme::Theme;

pub const ERROR_ICON: &str = "\u{26a0}\u{fe0f}";

/// Props for WeatherDisplay - read-only view of state
pub struct WeatherDisplayProps<'a> {
    pub state: &'a AppState,
    pub theme: &'a Theme,
    pub images: &'a ImageTable,
    pub is_focused: bool,
}

/// The main weather screen
#[derive(Default)]
pub struct WeatherDisplay;

impl Component<Action> for WeatherDisplay {
    type Props<'a> = WeatherDisplayProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Char('r') | KeyCode::F(5) => Some(Action::WeatherFetch),
                KeyCode::Char('/') => Some(Action::SearchOpen),
                KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: WeatherDisplayProps<'_>) {
        let chunks = Layout::vertical([
            Constraint::Min(1),    // Main content
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        let mut body = WeatherBody;
        body.render(
            frame,
            chunks[0],
            WeatherBodyProps {
                state: props.state,
                theme: props.theme,
                images: props.images,
            },
        );

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[1],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("/", "search"),
                    StatusBarHint::new("r", "retry"),
                    StatusBarHint::new("q", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Condition, CurrentConditions, LocationInfo, WeatherSnapshot};
    use tui_dispatch::testing::*;

    fn actions_for(keys: &str, state: &AppState, is_focused: bool) -> Vec<Action> {
        let mut component = WeatherDisplay;
        let theme = Theme::default();
        let images = ImageTable::default();
        let props = WeatherDisplayProps {
            state,
            theme: &theme,
            images: &images,
            is_focused,
        };
        component
            .handle_event(&EventKind::Key(key(keys)), props)
            .into_iter()
            .collect()
    }

    #[test]
    fn test_handle_event_retry() {
        let state = AppState::default();
        let actions = actions_for("r", &state, true);
        actions.assert_count(1);
        actions.assert_first(Action::WeatherFetch);
    }

    #[test]
    fn test_handle_event_search() {
        let state = AppState::default();
        actions_for("/", &state, true).assert_first(Action::SearchOpen);
    }

    #[test]
    fn test_handle_event_quit() {
        let state = AppState::default();
        actions_for("q", &state, true).assert_first(Action::Quit);
    }

    #[test]
    fn test_handle_event_unfocused_ignores() {
        let state = AppState::default();
        actions_for("r", &state, false).assert_empty();
    }

    #[test]
    fn test_render_loading() {
        let mut render = RenderHarness::new(60, 24);
        let mut component = WeatherDisplay;
        let state = AppState::new("Galle");
        let theme = Theme::default();
        let images = ImageTable::default();

        let output = render.render_to_string_plain(|frame| {
            let props = WeatherDisplayProps {
                state: &state,
                theme: &theme,
                images: &images,
                is_focused: true,
            };
            component.render(frame, frame.area(), props);
        });

        assert!(output.contains("Loading Galle..."));
    }

    #[test]
    fn test_render_weather() {
        let mut render = RenderHarness::new(60, 24);
        let mut component = WeatherDisplay;
        let state = AppState {
            loading: false,
            weather: Some(WeatherSnapshot {
                location: LocationInfo {
                    name: "Galle".into(),
                    country: "Sri Lanka".into(),
                    ..Default::default()
                },
                current: CurrentConditions {
                    temp_c: 29.0,
                    humidity: 74,
                    wind_kph: 18.0,
                    condition: Condition {
                        text: "Sunny".into(),
                    },
                },
                ..Default::default()
            }),
            ..Default::default()
        };
        let theme = Theme::default();
        let images = ImageTable::default();

        let output = render.render_to_string_plain(|frame| {
            let props = WeatherDisplayProps {
                state: &state,
                theme: &theme,
                images: &images,
                is_focused: true,
            };
            component.render(frame, frame.area(), props);
        });

        assert!(output.contains("Sunny"));
        assert!(output.contains("74%"));
    }
}
