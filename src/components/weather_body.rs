use artbox::{
    Alignment as ArtAlignment, Color as ArtColor, Fill, LinearGradient, Renderer, fonts,
    integrations::ratatui::ArtBox,
};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use super::location_header::{HEADER_OVERHEAD, gradient_colors};
use super::{Component, ERROR_ICON, LocationHeader, LocationHeaderProps};
use crate::action::Action;
use crate::images::{ImageKey, ImageTable};
use crate::state::AppState;
use crate::theme::Theme;
use crate::view::{DayView, WeatherView};

pub struct WeatherBody;

pub struct WeatherBodyProps<'a> {
    pub state: &'a AppState,
    pub theme: &'a Theme,
    pub images: &'a ImageTable,
}

/// Spinner frames, one per tick.
const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Widest a card in the daily forecast strip gets.
const DAY_CARD_WIDTH: u16 = 12;
/// Narrowest card: an abbreviated weekday and a short temperature.
const DAY_CARD_MIN_WIDTH: u16 = 6;
/// Below this width the weekday is abbreviated ("Wednesday" needs 9 plus margin).
const DAY_CARD_FULL_NAME_WIDTH: u16 = 10;
/// Rows of a daily card: image, weekday, temperature.
const DAY_CARD_HEIGHT: u16 = 3;

/// Fixed rows: error line, 4 blanks, condition, stats, label, daily strip.
const LAYOUT_FIXED: u16 = 8 + DAY_CARD_HEIGHT;

/// Text cap tiers: (header_cap, temp_cap).
/// terminus(6), miniwi(4), plain(1) - with HEADER_OVERHEAD added to header.
const TEXT_TIERS: [(u16, u16); 3] = [
    (6 + HEADER_OVERHEAD, 6),
    (4 + HEADER_OVERHEAD, 4),
    (1 + HEADER_OVERHEAD, 1),
];

struct LayoutSizing {
    show_art: bool,
    image_h: u16,
    header_cap: u16,
    temp_cap: u16,
}

/// Keep the weather art as long as possible by shrinking text first.
fn compute_layout(area_height: u16) -> LayoutSizing {
    for &(hcap, tcap) in &TEXT_TIERS {
        if hcap + tcap + LAYOUT_FIXED + ImageKey::ART_HEIGHT <= area_height {
            return LayoutSizing {
                show_art: true,
                image_h: ImageKey::ART_HEIGHT,
                header_cap: hcap,
                temp_cap: tcap,
            };
        }
    }
    let (hcap, tcap) = TEXT_TIERS[TEXT_TIERS.len() - 1];
    LayoutSizing {
        show_art: false,
        image_h: 1,
        header_cap: hcap,
        temp_cap: tcap,
    }
}

// ============================================================================
// Component
// ============================================================================

impl Component<Action> for WeatherBody {
    type Props<'a> = WeatherBodyProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        if state.loading {
            render_loading(frame, area, state, props.theme);
            return;
        }

        match &state.weather {
            Some(weather) => {
                let view = WeatherView::from_snapshot(weather, props.images);
                let sizing = compute_layout(area.height);
                render_ready(
                    frame,
                    area,
                    &view,
                    weather.current.temp_c,
                    state.weather_error.as_deref(),
                    props.theme,
                    &sizing,
                );
            }
            None => render_error(
                frame,
                area,
                state.weather_error.as_deref().unwrap_or("No weather data"),
                props.theme,
            ),
        }
    }
}

fn render_loading(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // spinner
        Constraint::Length(1), // blank
        Constraint::Length(1), // message
    ])
    .flex(Flex::Center)
    .split(area);

    let frame_idx = state.tick_count as usize % SPINNER.len();
    frame.render_widget(
        Paragraph::new(
            Line::from(Span::styled(
                SPINNER[frame_idx],
                Style::default().fg(theme.spinner()).bold(),
            ))
            .centered(),
        ),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(Span::styled(
                format!("Loading {}...", state.city),
                Style::default().fg(theme.muted),
            ))
            .centered(),
        ),
        chunks[2],
    );
}

fn make_layout(area: Rect, sizing: &LayoutSizing) -> std::rc::Rc<[Rect]> {
    Layout::vertical([
        Constraint::Length(1), // error / spacer
        Constraint::Max(sizing.header_cap), // city
        Constraint::Length(1), // blank
        Constraint::Length(sizing.image_h), // image
        Constraint::Length(1), // blank
        Constraint::Max(sizing.temp_cap), // temperature
        Constraint::Length(1), // condition
        Constraint::Length(1), // blank
        Constraint::Length(1), // wind / humidity / sunrise
        Constraint::Length(1), // blank
        Constraint::Length(1), // "Daily Forecast"
        Constraint::Length(DAY_CARD_HEIGHT), // daily strip
    ])
    .flex(Flex::Center)
    .split(area)
}

fn render_ready(
    frame: &mut Frame,
    area: Rect,
    view: &WeatherView,
    temp_c: f32,
    error: Option<&str>,
    theme: &Theme,
    sizing: &LayoutSizing,
) {
    let chunks = make_layout(area, sizing);

    // A failed refresh leaves the old snapshot up with a note on top.
    if let Some(error) = error {
        let line = Line::from(vec![
            Span::styled(format!("{ERROR_ICON} {error} "), Style::default().fg(theme.error)),
            Span::styled("r", Style::default().fg(theme.accent).bold()),
            Span::styled(" to retry", Style::default().fg(theme.muted)),
        ])
        .centered();
        frame.render_widget(Paragraph::new(line), chunks[0]);
    }

    let mut header = LocationHeader;
    header.render(
        frame,
        chunks[1],
        LocationHeaderProps {
            city: &view.city,
            country: &view.country,
            temperature: Some(temp_c),
            theme,
        },
    );

    if sizing.show_art {
        frame.render_widget(
            Paragraph::new(view.image.to_text()).alignment(Alignment::Center),
            chunks[3],
        );
    } else {
        let emoji = Line::from(view.image.emoji()).centered();
        frame.render_widget(Paragraph::new(emoji), chunks[3]);
    }

    let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
        .with_plain_fallback()
        .with_alignment(ArtAlignment::Center)
        .with_fill(temperature_gradient(temp_c));
    frame.render_widget(ArtBox::new(&renderer, &view.temperature), chunks[5]);

    let condition = Line::from(Span::styled(
        view.condition.clone(),
        Style::default().fg(theme.text),
    ))
    .centered();
    frame.render_widget(Paragraph::new(condition), chunks[6]);

    let stat = |icon: &'static str, value: &str| {
        vec![
            Span::styled(icon, Style::default().fg(theme.muted)),
            Span::styled(format!(" {value}"), Style::default().fg(theme.text).bold()),
        ]
    };
    let mut stats = stat("wind", &view.wind);
    stats.push(Span::raw("    "));
    stats.extend(stat("humidity", &view.humidity));
    stats.push(Span::raw("    "));
    stats.extend(stat("sunrise", &view.sunrise));
    frame.render_widget(Paragraph::new(Line::from(stats).centered()), chunks[8]);

    let label = Line::from(Span::styled(
        "Daily Forecast",
        Style::default().fg(theme.text),
    ))
    .centered();
    frame.render_widget(Paragraph::new(label), chunks[10]);

    render_daily(frame, chunks[11], &view.days, theme);
}

/// How the daily strip splits its width.
#[derive(Debug, PartialEq)]
struct CardPlan {
    shown: usize,
    card_width: u16,
    hidden: usize,
}

/// Shrink cards until every day fits; past the minimum width, show what
/// fits and leave one slot for a "+N" marker.
fn plan_cards(width: u16, days: usize) -> CardPlan {
    if days == 0 {
        return CardPlan {
            shown: 0,
            card_width: DAY_CARD_WIDTH,
            hidden: 0,
        };
    }
    let fit = width / days as u16;
    if fit >= DAY_CARD_MIN_WIDTH {
        return CardPlan {
            shown: days,
            card_width: fit.min(DAY_CARD_WIDTH),
            hidden: 0,
        };
    }
    let slots = (width / DAY_CARD_MIN_WIDTH).max(1) as usize;
    let shown = slots.saturating_sub(1).max(1).min(days);
    CardPlan {
        shown,
        card_width: DAY_CARD_MIN_WIDTH,
        hidden: days - shown,
    }
}

fn render_daily(frame: &mut Frame, area: Rect, days: &[DayView], theme: &Theme) {
    let plan = plan_cards(area.width, days.len());
    if plan.shown == 0 {
        return;
    }

    let mut constraints = vec![Constraint::Length(plan.card_width); plan.shown];
    if plan.hidden > 0 {
        constraints.push(Constraint::Length(DAY_CARD_MIN_WIDTH));
    }
    let cards = Layout::horizontal(constraints)
        .flex(Flex::Center)
        .split(area);

    let full_names = plan.card_width >= DAY_CARD_FULL_NAME_WIDTH;
    let card_style = Style::default().bg(theme.bg_white(0.15)).fg(theme.text);
    for (day, card) in days[..plan.shown].iter().zip(cards.iter()) {
        let weekday = if full_names {
            day.weekday.clone()
        } else {
            day.weekday.chars().take(3).collect()
        };
        let lines = vec![
            Line::from(day.image.emoji()).centered(),
            Line::from(weekday).centered(),
            Line::from(Span::styled(day.avg_temp.clone(), Style::default().bold())).centered(),
        ];
        frame.render_widget(
            Paragraph::new(lines).block(Block::default().style(card_style)),
            *card,
        );
    }

    if plan.hidden > 0 {
        let more = Line::from(Span::styled(
            format!("+{}", plan.hidden),
            Style::default().fg(theme.muted),
        ))
        .centered();
        frame.render_widget(
            Paragraph::new(vec![Line::default(), more]),
            cards[plan.shown],
        );
    }
}

fn render_error(frame: &mut Frame, area: Rect, error: &str, theme: &Theme) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // blank
        Constraint::Length(1), // icon
        Constraint::Length(1), // "Error"
        Constraint::Length(1), // message
        Constraint::Length(1), // blank
        Constraint::Length(1), // hint
    ])
    .flex(Flex::Center)
    .split(area);

    frame.render_widget(
        Paragraph::new(Line::from(ERROR_ICON).centered()),
        chunks[1],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![Span::styled(
                "Error",
                Style::default().fg(theme.error).bold(),
            )])
            .centered(),
        ),
        chunks[2],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![Span::styled(
                error.to_string(),
                Style::default().fg(theme.error),
            )])
            .centered(),
        ),
        chunks[3],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(theme.muted)),
                Span::styled("r", Style::default().fg(theme.accent).bold()),
                Span::styled(" to retry", Style::default().fg(theme.muted)),
            ])
            .centered(),
        ),
        chunks[5],
    );
}

fn temperature_gradient(celsius: f32) -> Fill {
    let (start, end): (ArtColor, ArtColor) = gradient_colors(Some(celsius));
    Fill::Linear(LinearGradient::horizontal(start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tall_area_gets_art_and_big_text() {
        let sizing = compute_layout(40);
        assert!(sizing.show_art);
        assert_eq!(sizing.header_cap, 6 + HEADER_OVERHEAD);
    }

    #[test]
    fn seven_days_fit_at_eighty_columns() {
        let plan = plan_cards(80, 7);
        assert_eq!(plan.shown, 7);
        assert_eq!(plan.hidden, 0);
        assert!(plan.card_width >= DAY_CARD_FULL_NAME_WIDTH);
    }

    #[test]
    fn cards_never_wider_than_max() {
        assert_eq!(
            plan_cards(200, 3),
            CardPlan {
                shown: 3,
                card_width: DAY_CARD_WIDTH,
                hidden: 0,
            }
        );
    }

    #[test]
    fn narrow_strip_marks_hidden_days() {
        // 24 columns hold 4 minimum cards: 3 days and the "+4" slot
        assert_eq!(
            plan_cards(24, 7),
            CardPlan {
                shown: 3,
                card_width: DAY_CARD_MIN_WIDTH,
                hidden: 4,
            }
        );
    }

    #[test]
    fn empty_forecast_shows_nothing() {
        assert_eq!(plan_cards(80, 0).shown, 0);
    }

    #[test]
    fn short_area_falls_back_to_emoji() {
        let sizing = compute_layout(12);
        assert!(!sizing.show_art);
        assert_eq!(sizing.image_h, 1);
    }
}
