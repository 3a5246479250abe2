//! Condition text -> weather image lookup
//!
//! WeatherAPI reports conditions as free text ("Patchy rain possible",
//! "Partly cloudy "). The screen maps that text to one of a small set of
//! images; anything the table does not know resolves to [`ImageKey::Other`].

use std::collections::HashMap;

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span, Text};

/// The images the screen can show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageKey {
    Sun,
    PartlyCloudy,
    Cloud,
    Mist,
    ModerateRain,
    HeavyRain,
    Snow,
    Thunder,
    /// Placeholder for condition text the table does not know
    Other,
}

impl ImageKey {
    pub fn name(self) -> &'static str {
        match self {
            ImageKey::Sun => "sun",
            ImageKey::PartlyCloudy => "partlycloudy",
            ImageKey::Cloud => "cloud",
            ImageKey::Mist => "mist",
            ImageKey::ModerateRain => "moderaterain",
            ImageKey::HeavyRain => "heavyrain",
            ImageKey::Snow => "snow",
            ImageKey::Thunder => "thunder",
            ImageKey::Other => "other",
        }
    }

    /// Single-cell fallback for the daily strip and tiny terminals
    pub fn emoji(self) -> &'static str {
        match self {
            ImageKey::Sun => "\u{2600}\u{fe0f}",
            ImageKey::PartlyCloudy => "\u{26c5}",
            ImageKey::Cloud => "\u{2601}\u{fe0f}",
            ImageKey::Mist => "\u{1f32b}\u{fe0f}",
            ImageKey::ModerateRain => "\u{1f326}\u{fe0f}",
            ImageKey::HeavyRain => "\u{1f327}\u{fe0f}",
            ImageKey::Snow => "\u{2744}\u{fe0f}",
            ImageKey::Thunder => "\u{26c8}\u{fe0f}",
            ImageKey::Other => "\u{1f321}\u{fe0f}",
        }
    }

    fn art(self) -> &'static [&'static str] {
        match self {
            ImageKey::Sun => &[
                r"   \   /   ",
                r"    .-.    ",
                r" ― (   ) ― ",
                r"    `-'    ",
                r"   /   \   ",
            ],
            ImageKey::PartlyCloudy => &[
                r"  \  /     ",
                r#"_ /"".-.   "#,
                r"  \_(   ). ",
                r"  /(___(__)",
                r"           ",
            ],
            ImageKey::Cloud => &[
                r"           ",
                r"    .--.   ",
                r" .-(    ). ",
                r"(___.__)__)",
                r"           ",
            ],
            ImageKey::Mist => &[
                r"           ",
                r" _ - _ - _ ",
                r"  _ - _ -  ",
                r" _ - _ - _ ",
                r"           ",
            ],
            ImageKey::ModerateRain => &[
                r"    .-.    ",
                r"   (   ).  ",
                r"  (___(__) ",
                r"   ' ' ' ' ",
                r"  ' ' ' '  ",
            ],
            ImageKey::HeavyRain => &[
                r"    .-.    ",
                r"   (   ).  ",
                r"  (___(__) ",
                r" ,',',','  ",
                r" ,',',','  ",
            ],
            ImageKey::Snow => &[
                r"    .-.    ",
                r"   (   ).  ",
                r"  (___(__) ",
                r"   *  *  * ",
                r"  *  *  *  ",
            ],
            ImageKey::Thunder => &[
                r"    .-.    ",
                r"   (   ).  ",
                r"  (___(__) ",
                r"  ' / ' /  ",
                r"  ' ' ' '  ",
            ],
            ImageKey::Other => &[
                r"           ",
                r"   .---.   ",
                r"  (  ?  )  ",
                r"   `---'   ",
                r"           ",
            ],
        }
    }

    fn color(self) -> Color {
        match self {
            ImageKey::Sun => Color::Yellow,
            ImageKey::PartlyCloudy => Color::Rgb(230, 210, 120),
            ImageKey::Cloud | ImageKey::Other => Color::Rgb(170, 170, 185),
            ImageKey::Mist => Color::Rgb(150, 150, 160),
            ImageKey::ModerateRain | ImageKey::HeavyRain => Color::Rgb(110, 160, 230),
            ImageKey::Snow => Color::White,
            ImageKey::Thunder => Color::Rgb(240, 200, 90),
        }
    }

    /// Height in rows of [`ImageKey::to_text`].
    pub const ART_HEIGHT: u16 = 5;

    pub fn to_text(self) -> Text<'static> {
        let style = Style::default().fg(self.color());
        Text::from(
            self.art()
                .iter()
                .map(|line| Line::from(Span::styled(*line, style)))
                .collect::<Vec<_>>(),
        )
    }
}

/// Condition text -> image table handed to the rendering layer.
#[derive(Clone, Debug)]
pub struct ImageTable {
    entries: HashMap<String, ImageKey>,
    placeholder: ImageKey,
}

impl ImageTable {
    pub fn new(placeholder: ImageKey) -> Self {
        Self {
            entries: HashMap::new(),
            placeholder,
        }
    }

    pub fn with(mut self, condition: &str, key: ImageKey) -> Self {
        self.insert(condition, key);
        self
    }

    pub fn insert(&mut self, condition: &str, key: ImageKey) {
        self.entries.insert(normalize(condition), key);
    }

    /// Image for `condition`; unknown or empty text yields the placeholder.
    pub fn lookup(&self, condition: &str) -> ImageKey {
        self.entries
            .get(&normalize(condition))
            .copied()
            .unwrap_or(self.placeholder)
    }

    pub fn placeholder(&self) -> ImageKey {
        self.placeholder
    }
}

impl Default for ImageTable {
    fn default() -> Self {
        use ImageKey::*;
        [
            ("Sunny", Sun),
            ("Clear", Sun),
            ("Partly cloudy", PartlyCloudy),
            ("Cloudy", Cloud),
            ("Overcast", Cloud),
            ("Mist", Mist),
            ("Fog", Mist),
            ("Freezing fog", Mist),
            ("Patchy rain possible", ModerateRain),
            ("Patchy rain nearby", ModerateRain),
            ("Patchy light drizzle", ModerateRain),
            ("Light drizzle", ModerateRain),
            ("Patchy light rain", ModerateRain),
            ("Light rain", ModerateRain),
            ("Light rain shower", ModerateRain),
            ("Moderate rain", ModerateRain),
            ("Moderate rain at times", ModerateRain),
            ("Heavy rain", HeavyRain),
            ("Heavy rain at times", HeavyRain),
            ("Torrential rain shower", HeavyRain),
            ("Moderate or heavy freezing rain", HeavyRain),
            ("Moderate or heavy rain shower", HeavyRain),
            ("Patchy snow possible", Snow),
            ("Patchy light snow", Snow),
            ("Light snow", Snow),
            ("Moderate snow", Snow),
            ("Heavy snow", Snow),
            ("Blizzard", Snow),
            ("Thundery outbreaks possible", Thunder),
            ("Patchy light rain with thunder", Thunder),
            ("Moderate or heavy rain with thunder", Thunder),
        ]
        .into_iter()
        .fold(ImageTable::new(Other), |table, (text, key)| {
            table.with(text, key)
        })
    }
}

fn normalize(condition: &str) -> String {
    condition.trim().to_lowercase()
}
