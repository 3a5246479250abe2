//! Render-only view data derived from a [`WeatherSnapshot`]
//!
//! Every field has a defined fallback so the components never have to reach
//! into optional data themselves.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::images::{ImageKey, ImageTable};
use crate::state::{ForecastDay, WeatherSnapshot};

/// Shown wherever a value is missing from the snapshot.
pub const MISSING: &str = "--";

#[derive(Clone, Debug, PartialEq)]
pub struct WeatherView {
    pub city: String,
    pub country: String,
    pub temperature: String,
    pub condition: String,
    pub image: ImageKey,
    pub wind: String,
    pub humidity: String,
    pub sunrise: String,
    pub days: Vec<DayView>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DayView {
    pub weekday: String,
    pub date: String,
    pub avg_temp: String,
    pub image: ImageKey,
}

impl WeatherView {
    pub fn from_snapshot(weather: &WeatherSnapshot, images: &ImageTable) -> Self {
        let current = &weather.current;
        Self {
            city: non_empty(&weather.location.name),
            country: weather.location.country.trim().to_string(),
            temperature: degrees(current.temp_c),
            condition: non_empty(&current.condition.text),
            image: images.lookup(&current.condition.text),
            wind: format!("{}Km", trim_float(current.wind_kph)),
            humidity: format!("{}%", current.humidity),
            sunrise: weather
                .today()
                .map(|day| non_empty(&day.astro.sunrise))
                .unwrap_or_else(|| MISSING.to_string()),
            days: weather
                .forecast
                .forecastday
                .iter()
                .map(|day| DayView::from_day(day, images))
                .collect(),
        }
    }

    /// "London, United Kingdom" or just the city when no country is known.
    pub fn headline(&self) -> String {
        if self.country.is_empty() {
            self.city.clone()
        } else {
            format!("{}, {}", self.city, self.country)
        }
    }
}

impl DayView {
    pub fn from_day(day: &ForecastDay, images: &ImageTable) -> Self {
        Self {
            weekday: weekday_name(&day.date).unwrap_or_else(|| non_empty(&day.date)),
            date: non_empty(&day.date),
            avg_temp: degrees(day.day.avgtemp_c),
            image: images.lookup(&day.day.condition.text),
        }
    }
}

/// Full English weekday for an ISO `YYYY-MM-DD` date.
pub fn weekday_name(date: &str) -> Option<String> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()?;
    let name = match date.weekday() {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    };
    Some(name.to_string())
}

fn degrees(celsius: f32) -> String {
    format!("{}°", trim_float(celsius))
}

/// 21.0 -> "21", 21.5 -> "21.5"
fn trim_float(value: f32) -> String {
    if !value.is_finite() {
        return MISSING.to_string();
    }
    let rounded = (value * 10.0).round() / 10.0;
    // -0.04 rounds to -0.0, which would print as "-0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    if rounded.fract() == 0.0 {
        format!("{:.0}", rounded)
    } else {
        format!("{:.1}", rounded)
    }
}

fn non_empty(text: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        MISSING.to_string()
    } else {
        text.to_string()
    }
}
