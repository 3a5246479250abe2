//! WeatherAPI.com client

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::state::{Location, WeatherSnapshot};

pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";

/// The two lookups the screen depends on.
#[async_trait]
pub trait WeatherService: Send + Sync {
    /// Locations whose name matches `query`. No matches is `Ok(vec![])`.
    async fn search_locations(&self, query: &str) -> Result<Vec<Location>, ApiError>;

    /// Current conditions plus `days` of daily forecast for `city`.
    async fn forecast(&self, city: &str, days: u8) -> Result<WeatherSnapshot, ApiError>;
}

#[derive(Debug, Clone)]
pub struct WeatherApiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl WeatherApiClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/{}.json", self.base_url, name)
    }

    async fn get(&self, name: &str, query: &[(&str, &str)]) -> Result<String, ApiError> {
        let url = self.endpoint(name);
        debug!(%url, ?query, "weather api request");

        let response = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .query(query)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "weather api error");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }
        Ok(body)
    }
}

#[async_trait]
impl WeatherService for WeatherApiClient {
    async fn search_locations(&self, query: &str) -> Result<Vec<Location>, ApiError> {
        let body = self.get("search", &[("q", query)]).await?;
        parse_locations(&body)
    }

    async fn forecast(&self, city: &str, days: u8) -> Result<WeatherSnapshot, ApiError> {
        let days = days.to_string();
        let body = self
            .get("forecast", &[("q", city), ("days", days.as_str())])
            .await?;
        parse_forecast(&body)
    }
}

/// `search.json` returns a bare array; null or missing entries are tolerated.
pub fn parse_locations(body: &str) -> Result<Vec<Location>, ApiError> {
    let parsed: Option<Vec<Location>> = serde_json::from_str(body)?;
    Ok(parsed.unwrap_or_default())
}

/// `forecast.json` carries far more than the screen shows; extra fields are ignored.
pub fn parse_forecast(body: &str) -> Result<WeatherSnapshot, ApiError> {
    Ok(serde_json::from_str(body)?)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_strips_trailing_slash() {
        let client =
            WeatherApiClient::new("http://localhost:9000/v1/", "k", Duration::from_secs(1))
                .unwrap();
        assert_eq!(client.endpoint("search"), "http://localhost:9000/v1/search.json");
    }

    #[test]
    fn truncate_keeps_short_bodies() {
        assert_eq!(truncate_body("nope"), "nope");
        let long = "x".repeat(250);
        let cut = truncate_body(&long);
        assert_eq!(cut.len(), 203);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let long = "é".repeat(300);
        let cut = truncate_body(&long);
        assert_eq!(cut.chars().count(), 203);
    }

    #[test]
    fn parse_null_search_is_empty() {
        assert!(parse_locations("null").unwrap().is_empty());
        assert!(parse_locations("[]").unwrap().is_empty());
    }

    #[test]
    fn parse_malformed_is_parse_error() {
        let err = parse_forecast(r#"{"current": 3}"#).unwrap_err();
        assert!(matches!(err, ApiError::Parse(_)));
    }
}
