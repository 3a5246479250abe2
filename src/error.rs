//! Error types

/// Failure of a single call to the weather API.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("weather service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Invalid startup configuration.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("missing WeatherAPI key (pass --api-key or set WEATHER_API_KEY)")]
    MissingApiKey,
    #[error("default city must not be empty")]
    EmptyCity,
    #[error("forecast days must be between 1 and {max}, got {got}")]
    DaysOutOfRange { got: u8, max: u8 },
    #[error("invalid base URL: {0}")]
    BaseUrl(String),
}
