use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::{config::ApiConfig, model::WeatherSnapshot};

use super::{ClientError, ForecastParams, WeatherApi};

/// WeatherAPI.com `forecast.json` client.
#[derive(Debug, Clone)]
pub struct WeatherApiClient {
    base_url: String,
    http: Client,
}

impl WeatherApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(timeout).build().map_err(ClientError::Build)?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { base_url, http })
    }

    pub fn from_config(api: &ApiConfig) -> Result<Self, ClientError> {
        Self::new(api.base_url.clone(), Duration::from_secs(api.timeout_secs))
    }

    fn forecast_url(&self) -> String {
        format!("{}/forecast.json", self.base_url)
    }
}

#[async_trait]
impl WeatherApi for WeatherApiClient {
    #[instrument(skip(self, api_key, params), fields(days = %params.days))]
    async fn fetch_forecast(
        &self,
        api_key: &str,
        city: &str,
        params: &ForecastParams,
    ) -> Result<WeatherSnapshot, ClientError> {
        let url = self.forecast_url();
        debug!(url = %url, "Fetching forecast");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("key", api_key),
                ("q", city),
                ("days", params.days.as_str()),
                ("aqi", params.aqi.as_str()),
                ("alerts", params.alerts.as_str()),
            ])
            .send()
            .await
            .map_err(transport)?;

        let status = res.status();
        let body = res.text().await.map_err(transport)?;
        debug!(%status, bytes = body.len(), "Forecast response received");

        if !status.is_success() {
            return Err(ClientError::Status { status, message: error_message(&body) });
        }

        serde_json::from_str(&body).map_err(ClientError::Decode)
    }
}

/// The request URL carries the API key in its query, so it is dropped from the error.
fn transport(err: reqwest::Error) -> ClientError {
    ClientError::Transport(err.without_url())
}

/// WeatherAPI error body: `{"error": {"code": 1006, "message": "..."}}`.
#[derive(Debug, Deserialize)]
struct WaErrorBody {
    error: WaError,
}

#[derive(Debug, Deserialize)]
struct WaError {
    message: String,
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<WaErrorBody>(body) {
        Ok(parsed) if !parsed.error.message.trim().is_empty() => parsed.error.message,
        _ => truncate_body(body),
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None if body.trim().is_empty() => "<empty body>".to_string(),
        None => body.to_string(),
    }
}
