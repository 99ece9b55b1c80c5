//! Core library for the `weather` home screen.
//!
//! This crate defines:
//! - Configuration & API key resolution
//! - The WeatherAPI.com forecast client and the repository over it
//! - Shared domain models and the `Resource` load state
//! - The home screen presentation model (hour slicing, labels, fetch lifecycle)
//!
//! It is used by `weather-cli`, but can also be reused by other front ends.

pub mod config;
pub mod home;
pub mod model;
pub mod remote;
pub mod repository;
pub mod resource;
pub mod screen;

pub use config::{ApiConfig, Config};
pub use home::WeatherHomeViewModel;
pub use model::{
    Condition, CurrentConditions, DaySummary, ForecastBlock, ForecastDay, HourRecord,
    LocationInfo, WeatherSnapshot,
};
pub use remote::{ClientError, ForecastParams, WeatherApi, weatherapi::WeatherApiClient};
pub use repository::{RemoteWeatherRepository, WeatherRepository};
pub use resource::Resource;
pub use screen::{BottomSection, HomeScreen, HourTile, WeatherSection};
