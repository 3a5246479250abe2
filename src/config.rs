//! Runtime configuration, validated once at startup.

use std::time::Duration;

use crate::error::ConfigError;
use crate::state::{DEFAULT_CITY, FORECAST_DAYS};

/// WeatherAPI.com serves at most 14 days of forecast.
pub const MAX_FORECAST_DAYS: u8 = 14;

/// Quiet period before a typed query is looked up.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(1200);

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub city: String,
    pub days: u8,
    pub timeout: Duration,
    pub search_debounce: Duration,
}

impl Config {
    pub fn new(api_key: Option<String>, base_url: String, city: String) -> Self {
        Self {
            api_key: api_key.unwrap_or_default(),
            base_url,
            city,
            days: FORECAST_DAYS,
            timeout: DEFAULT_TIMEOUT,
            search_debounce: SEARCH_DEBOUNCE,
        }
    }

    pub fn with_days(mut self, days: u8) -> Self {
        self.days = days;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if self.city.trim().is_empty() {
            return Err(ConfigError::EmptyCity);
        }
        if !(1..=MAX_FORECAST_DAYS).contains(&self.days) {
            return Err(ConfigError::DaysOutOfRange {
                got: self.days,
                max: MAX_FORECAST_DAYS,
            });
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::BaseUrl(self.base_url));
        }
        Ok(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(
            None,
            crate::api::DEFAULT_BASE_URL.to_string(),
            DEFAULT_CITY.to_string(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_key() -> Config {
        Config {
            api_key: "KEY".into(),
            ..Default::default()
        }
    }

    #[test]
    fn defaults_match_screen() {
        let cfg = Config::default();
        assert_eq!(cfg.city, "Sri Lanka");
        assert_eq!(cfg.days, 7);
        assert_eq!(cfg.search_debounce, Duration::from_millis(1200));
    }

    #[test]
    fn missing_key_is_rejected() {
        assert_eq!(
            Config::default().validate().unwrap_err(),
            ConfigError::MissingApiKey
        );
    }

    #[test]
    fn blank_city_is_rejected() {
        let cfg = Config {
            city: "  ".into(),
            ..with_key()
        };
        assert_eq!(cfg.validate().unwrap_err(), ConfigError::EmptyCity);
    }

    #[test]
    fn days_must_be_in_range() {
        let err = with_key().with_days(0).validate().unwrap_err();
        assert_eq!(err, ConfigError::DaysOutOfRange { got: 0, max: 14 });
        assert!(with_key().with_days(15).validate().is_err());
        assert!(with_key().with_days(14).validate().is_ok());
    }

    #[test]
    fn base_url_needs_scheme() {
        let cfg = Config {
            base_url: "api.weatherapi.com".into(),
            ..with_key()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::BaseUrl(_))));
    }
}
