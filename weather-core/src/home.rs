use std::sync::Arc;

use crate::{model::WeatherSnapshot, repository::WeatherRepository, resource::Resource};

/// Seam between the home screen and the data layer.
#[derive(Debug, Clone)]
pub struct WeatherHomeViewModel {
    repository: Arc<dyn WeatherRepository>,
}

impl WeatherHomeViewModel {
    pub fn new(repository: Arc<dyn WeatherRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_weather_info(&self, api_key: &str, city: &str) -> Resource<WeatherSnapshot> {
        self.repository.get_weather_data(api_key, city).await
    }
}
