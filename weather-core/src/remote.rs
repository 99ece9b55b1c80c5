use crate::{Config, WeatherSnapshot, remote::weatherapi::WeatherApiClient};
use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

pub mod weatherapi;

/// Ways a forecast request can fail.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("Failed to reach WeatherAPI: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("WeatherAPI request failed with status {status}: {message}")]
    Status { status: reqwest::StatusCode, message: String },

    #[error("Failed to parse WeatherAPI forecast JSON: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Query flags sent alongside the key and city.
///
/// WeatherAPI takes these as strings (`"yes"` / `"no"`), so they are kept as strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastParams {
    pub days: String,
    pub aqi: String,
    pub alerts: String,
}

impl Default for ForecastParams {
    fn default() -> Self {
        Self { days: "2".to_string(), aqi: "no".to_string(), alerts: "no".to_string() }
    }
}

#[async_trait]
pub trait WeatherApi: Send + Sync + Debug {
    async fn fetch_forecast(
        &self,
        api_key: &str,
        city: &str,
        params: &ForecastParams,
    ) -> Result<WeatherSnapshot, ClientError>;
}

/// Construct the WeatherAPI client described by `config`.
pub fn client_from_config(config: &Config) -> Result<Box<dyn WeatherApi>, ClientError> {
    Ok(Box::new(WeatherApiClient::from_config(&config.api)?))
}
