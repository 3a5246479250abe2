use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Modal, ModalBehavior, ModalProps, ModalStyle, Padding, ScrollbarStyle, SelectList,
    SelectListBehavior, SelectListProps, SelectListStyle, SelectionStyle, TextInput,
    TextInputProps, TextInputStyle, centered_rect, highlight_substring,
};

use super::Component;
use crate::action::Action;
use crate::state::{Location, MIN_QUERY_LEN};
use crate::theme::Theme;

/// Modal size as (percent width, rows).
pub const SEARCH_MODAL_SIZE: (u16, u16) = (60, 14);

const PLACEHOLDER: &str = "Search for a city...";

pub struct SearchOverlay {
    input: TextInput,
    list: SelectList,
    modal: Modal,
    was_open: bool,
}

pub struct SearchOverlayProps<'a> {
    pub query: &'a str,
    pub results: &'a [Location],
    pub selected: usize,
    pub is_focused: bool,
    pub error: Option<&'a str>,
    pub theme: &'a Theme,
    // Action constructors
    pub on_query_change: fn(String) -> Action,
    pub on_query_submit: fn(String) -> Action,
    pub on_select: fn(usize) -> Action,
}

impl Default for SearchOverlay {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
            list: SelectList::new(),
            modal: Modal::new(),
            was_open: false,
        }
    }
}

impl SearchOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the input and list whenever the panel is reopened.
    pub fn set_open(&mut self, is_open: bool) {
        if is_open && !self.was_open {
            self.input = TextInput::new();
            self.list = SelectList::new();
        }
        self.was_open = is_open;
    }

    fn result_items(results: &[Location], query: &str, theme: &Theme) -> Vec<Line<'static>> {
        let base = Style::default().fg(theme.picklist_fg);
        let highlight = Style::default()
            .fg(theme.picklist_fg)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        results
            .iter()
            .map(|loc| highlight_substring(&loc.label(), query, base, highlight))
            .collect()
    }

    fn list_style(theme: &Theme) -> SelectListStyle {
        SelectListStyle {
            base: BaseStyle {
                border: None,
                padding: Padding::xy(1, 0),
                bg: Some(theme.picklist_bg),
                fg: Some(theme.picklist_fg),
            },
            selection: SelectionStyle::default(),
            scrollbar: ScrollbarStyle::default(),
        }
    }

    fn input_style(theme: &Theme) -> TextInputStyle {
        TextInputStyle {
            base: BaseStyle {
                border: None,
                padding: Padding::all(1),
                bg: Some(theme.bg_white(0.1)),
                fg: Some(theme.text),
            },
            placeholder_style: Some(Style::default().fg(theme.muted)),
            cursor_style: None,
        }
    }

    /// Line under the input: the lookup error, or what to do next.
    fn status_line<'a>(props: &SearchOverlayProps<'a>) -> Line<'a> {
        let theme = props.theme;
        if let Some(error) = props.error {
            return Line::from(Span::styled(error, Style::default().fg(theme.error)));
        }
        let hint = if props.query.chars().count() <= MIN_QUERY_LEN {
            "Type at least 3 letters"
        } else if props.results.is_empty() {
            "No matches yet"
        } else {
            "\u{2191}\u{2193} choose  Enter select  Esc close"
        };
        Line::from(Span::styled(hint, Style::default().fg(theme.muted)))
    }
}

impl Component<Action> for SearchOverlay {
    type Props<'a> = SearchOverlayProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        match key.code {
            KeyCode::Esc => return vec![Action::SearchClose],
            KeyCode::Enter => {
                if let Some(location) = props.results.get(props.selected) {
                    return vec![Action::LocationSelected(location.clone())];
                }
                return vec![(props.on_query_submit)(props.query.to_string())];
            }
            KeyCode::Down | KeyCode::Up => {
                if props.results.is_empty() {
                    return Vec::new();
                }
                let items = Self::result_items(props.results, props.query, props.theme);
                let list_props = SelectListProps {
                    items: &items,
                    count: items.len(),
                    selected: props.selected,
                    is_focused: true,
                    style: Self::list_style(props.theme),
                    behavior: SelectListBehavior::default(),
                    on_select: props.on_select,
                    render_item: &|item| item.clone(),
                };
                return self
                    .list
                    .handle_event(event, list_props)
                    .into_iter()
                    .collect();
            }
            _ => {}
        }

        // Everything else edits the query
        let input_props = TextInputProps {
            value: props.query,
            placeholder: PLACEHOLDER,
            is_focused: true,
            style: Self::input_style(props.theme),
            on_change: props.on_query_change,
            on_submit: props.on_query_submit,
            on_cursor_move: Some(|_| Action::Render),
        };

        self.input
            .handle_event(event, input_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        if area.width < 20 || area.height < 8 {
            return;
        }

        let theme = props.theme;
        let status = Self::status_line(&props);
        let SearchOverlay {
            input, list, modal, ..
        } = self;
        let (width, height) = SEARCH_MODAL_SIZE;
        let modal_area = centered_rect(width, height, area);
        let mut render_content = |frame: &mut Frame, content_area: Rect| {
            let chunks = Layout::vertical([
                Constraint::Length(3), // Input
                Constraint::Length(1), // Error / hint
                Constraint::Min(1),    // Candidates
            ])
            .split(content_area);

            let input_props = TextInputProps {
                value: props.query,
                placeholder: PLACEHOLDER,
                is_focused: props.is_focused,
                style: Self::input_style(theme),
                on_change: props.on_query_change,
                on_submit: props.on_query_submit,
                on_cursor_move: Some(|_| Action::Render),
            };
            input.render(frame, chunks[0], input_props);

            frame.render_widget(Paragraph::new(status.clone().centered()), chunks[1]);

            if props.results.is_empty() {
                return;
            }
            let items = Self::result_items(props.results, props.query, theme);
            let list_props = SelectListProps {
                items: &items,
                count: items.len(),
                selected: props.selected,
                is_focused: props.is_focused,
                style: Self::list_style(theme),
                behavior: SelectListBehavior::default(),
                on_select: props.on_select,
                render_item: &|item| item.clone(),
            };
            list.render(frame, chunks[2], list_props);
        };

        modal.render(
            frame,
            area,
            ModalProps {
                is_open: true,
                is_focused: props.is_focused,
                area: modal_area,
                style: ModalStyle {
                    base: BaseStyle {
                        bg: Some(theme.bg_white(0.05)),
                        padding: Padding::default(),
                        border: None,
                        fg: None,
                    },
                    ..Default::default()
                },
                behavior: ModalBehavior::default(),
                on_close: || Action::SearchClose,
                render_content: &mut render_content,
            },
        );
    }
}
