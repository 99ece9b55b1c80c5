use serde::{Deserialize, Serialize};

/// Full `forecast.json` response body, as far as the home screen needs it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub current: CurrentConditions,
    pub forecast: ForecastBlock,
    pub location: LocationInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temp_c: f64,
    pub condition: Condition,
    #[serde(default)]
    pub feelslike_c: f64,
    #[serde(default)]
    pub humidity: u8,
    #[serde(default)]
    pub wind_kph: f64,
    #[serde(default)]
    pub last_updated: String,
}

/// Text label plus a protocol-relative icon path, e.g. `//cdn.weatherapi.com/.../113.png`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub text: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastBlock {
    pub forecastday: Vec<ForecastDay>,
}

impl ForecastBlock {
    /// All hourly records, day by day, in the order the API returned them.
    pub fn hours(&self) -> Vec<&HourRecord> {
        self.forecastday.iter().flat_map(|day| day.hour.iter()).collect()
    }

    pub fn today(&self) -> Option<&ForecastDay> {
        self.forecastday.first()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    #[serde(default)]
    pub date: String,
    pub day: DaySummary,
    pub hour: Vec<HourRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    pub maxtemp_c: f64,
    pub mintemp_c: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourRecord {
    /// Local time, `YYYY-MM-DD HH:MM`.
    pub time: String,
    pub temp_c: f64,
    pub condition: Condition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationInfo {
    pub name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub tz_id: String,
    #[serde(default)]
    pub localtime: String,
}
