use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    model::WeatherSnapshot,
    remote::{ForecastParams, WeatherApi},
    resource::Resource,
};

#[async_trait]
pub trait WeatherRepository: Send + Sync + Debug {
    /// Fetch the forecast for `city`. Never fails: errors come back as `Resource::Error`.
    async fn get_weather_data(&self, api_key: &str, city: &str) -> Resource<WeatherSnapshot>;
}

/// Repository backed by the remote WeatherAPI client.
#[derive(Debug)]
pub struct RemoteWeatherRepository {
    api: Box<dyn WeatherApi>,
}

impl RemoteWeatherRepository {
    pub fn new(api: Box<dyn WeatherApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl WeatherRepository for RemoteWeatherRepository {
    async fn get_weather_data(&self, api_key: &str, city: &str) -> Resource<WeatherSnapshot> {
        // Every failure kind collapses into one displayable message.
        match self.api.fetch_forecast(api_key, city, &ForecastParams::default()).await {
            Ok(snapshot) => Resource::Success(snapshot),
            Err(err) => {
                tracing::warn!(error = %err, city, "weather fetch failed");
                Resource::error(err.to_string())
            }
        }
    }
}
