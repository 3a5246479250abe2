//! Colours for the rendering layer, passed explicitly through props.

use ratatui::style::Color;

#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    /// Screen background the translucent panels are blended over
    pub background: (u8, u8, u8),
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub error: Color,
    /// Candidate list background
    pub picklist_bg: Color,
    pub picklist_fg: Color,
}

impl Theme {
    /// White at `opacity` over the background, like a frosted panel.
    pub fn bg_white(&self, opacity: f32) -> Color {
        let a = opacity.clamp(0.0, 1.0);
        let (r, g, b) = self.background;
        let blend = |c: u8| (c as f32 + (255.0 - c as f32) * a).round() as u8;
        Color::Rgb(blend(r), blend(g), blend(b))
    }

    /// Spinner colour
    pub fn spinner(&self) -> Color {
        self.accent
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: (20, 32, 44),
            text: Color::White,
            muted: Color::Gray,
            accent: Color::Rgb(11, 179, 178),
            error: Color::Rgb(220, 110, 110),
            picklist_bg: Color::Rgb(209, 213, 219),
            picklist_fg: Color::Black,
        }
    }
}
