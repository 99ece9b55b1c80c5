//! Presentation model for the home screen.
//!
//! The screen is a header with the city name over a bottom section whose
//! content follows the `Loading -> Success | Error` lifecycle of one fetch.
//! Everything here is plain data; turning it into pixels or terminal text
//! is left to the caller.

use chrono::{NaiveDateTime, Timelike};
use tokio::{sync::watch, task::JoinHandle};

use crate::{
    home::WeatherHomeViewModel,
    model::{HourRecord, WeatherSnapshot},
    resource::Resource,
};

/// Number of leading characters (`YYYY-MM-DD `) stripped from an hour timestamp.
const DATE_PREFIX_LEN: usize = 11;

#[derive(Debug, Clone, PartialEq)]
pub struct HomeScreen {
    pub top: TopSection,
    pub bottom: Resource<WeatherSection>,
}

impl HomeScreen {
    pub fn new(city: impl Into<String>, state: Resource<WeatherSnapshot>, now: NaiveDateTime) -> Self {
        Self {
            top: TopSection { city: city.into() },
            bottom: state.map(|snapshot| WeatherSection::build(&snapshot, now)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopSection {
    pub city: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSection {
    pub current: CurrentPanel,
    pub hours: Vec<HourTile>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentPanel {
    pub temperature: i64,
    pub condition: String,
    /// e.g. `Jun 1 Sat`.
    pub date_label: String,
    /// Today's high, absent when the forecast has no days.
    pub high: Option<i64>,
    pub low: Option<i64>,
    pub feels_like: i64,
    pub humidity: u8,
    pub wind_kph: i64,
    pub last_updated: String,
    /// `name, region, country`, blanks skipped.
    pub location: String,
    /// Local time at the location followed by its timezone id.
    pub local_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourTile {
    /// `HH:MM`.
    pub time_label: String,
    pub icon_url: String,
    pub temperature: i64,
    pub condition: String,
}

impl HourTile {
    fn from_record(hour: &HourRecord) -> Self {
        Self {
            time_label: time_label(&hour.time).to_string(),
            icon_url: icon_url(&hour.condition.icon),
            temperature: truncate_temp(hour.temp_c),
            condition: hour.condition.text.clone(),
        }
    }
}

impl WeatherSection {
    /// Derive the display model from a snapshot as seen at local time `now`.
    ///
    /// The first forecast day is taken to be today, so hour `now.hour() + 1`
    /// of the flattened list is the first tile shown.
    pub fn build(snapshot: &WeatherSnapshot, now: NaiveDateTime) -> Self {
        let today = snapshot.forecast.today();
        let current = CurrentPanel {
            temperature: truncate_temp(snapshot.current.temp_c),
            condition: snapshot.current.condition.text.clone(),
            date_label: now.format("%b %-d %a").to_string(),
            high: today.map(|d| truncate_temp(d.day.maxtemp_c)),
            low: today.map(|d| truncate_temp(d.day.mintemp_c)),
            feels_like: truncate_temp(snapshot.current.feelslike_c),
            humidity: snapshot.current.humidity,
            wind_kph: truncate_temp(snapshot.current.wind_kph),
            last_updated: snapshot.current.last_updated.clone(),
            location: join_non_empty(
                &[
                    snapshot.location.name.as_str(),
                    snapshot.location.region.as_str(),
                    snapshot.location.country.as_str(),
                ],
                ", ",
            ),
            local_time: join_non_empty(
                &[snapshot.location.localtime.as_str(), snapshot.location.tz_id.as_str()],
                " ",
            ),
        };

        let hours = snapshot.forecast.hours();
        let hours = upcoming_hours(&hours, now.hour())
            .iter()
            .map(|hour| HourTile::from_record(hour))
            .collect();

        Self { current, hours }
    }
}

fn join_non_empty(parts: &[&str], sep: &str) -> String {
    parts.iter().map(|p| p.trim()).filter(|p| !p.is_empty()).collect::<Vec<_>>().join(sep)
}

/// Hours after the current one: everything from index `current_hour + 1` on.
pub fn upcoming_hours<T>(hours: &[T], current_hour: u32) -> &[T] {
    let cutoff = current_hour as usize + 1;
    hours.get(cutoff..).unwrap_or(&[])
}

/// `"2024-06-01 14:00"` -> `"14:00"`.
pub fn time_label(time: &str) -> &str {
    match time.char_indices().nth(DATE_PREFIX_LEN) {
        Some((start, _)) => &time[start..],
        None => "",
    }
}

pub fn icon_url(icon_path: &str) -> String {
    format!("https:{icon_path}")
}

/// Whole degrees, truncated toward zero: `23.9 -> 23`, `-0.5 -> 0`.
pub fn truncate_temp(celsius: f64) -> i64 {
    celsius.trunc() as i64
}

/// Owner of the single in-flight fetch behind the bottom section.
///
/// The state starts as `Loading` and is replaced once by the fetch outcome.
/// Dropping the section aborts the fetch if it is still running.
#[derive(Debug)]
pub struct BottomSection {
    state: watch::Receiver<Resource<WeatherSnapshot>>,
    task: JoinHandle<()>,
}

impl BottomSection {
    /// Start fetching. Must be called from within a tokio runtime.
    pub fn launch(view_model: WeatherHomeViewModel, api_key: String, city: String) -> Self {
        let (tx, rx) = watch::channel(Resource::Loading);

        let task = tokio::spawn(async move {
            let result = view_model.get_weather_info(&api_key, &city).await;
            // Receiver gone means the screen was torn down; nothing to publish to.
            let _ = tx.send(result);
        });

        Self { state: rx, task }
    }

    pub fn state(&self) -> Resource<WeatherSnapshot> {
        self.state.borrow().clone()
    }

    /// Wait for the fetch to settle into `Success` or `Error`.
    pub async fn settled(&mut self) -> Resource<WeatherSnapshot> {
        match self.state.wait_for(|state| !state.is_loading()).await {
            Ok(state) => state.clone(),
            Err(_) => Resource::error("Weather request ended without a result"),
        }
    }
}

impl Drop for BottomSection {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{WeatherRepository, tests::sample_snapshot};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::{
        sync::{
            Arc,
            atomic::{AtomicBool, Ordering},
        },
        time::Duration,
    };
    use tokio::sync::Notify;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(hour, 30, 0).unwrap()
    }

    #[test]
    fn slice_starts_after_current_hour() {
        let hours: Vec<u32> = (0..48).collect();

        let slice = upcoming_hours(&hours, 10);

        assert_eq!(slice.len(), 37);
        assert_eq!(slice[0], 11);
        assert_eq!(*slice.last().unwrap(), 47);
    }

    #[test]
    fn slice_at_last_hour_of_day_is_tomorrow() {
        let hours: Vec<u32> = (0..48).collect();

        let slice = upcoming_hours(&hours, 23);

        assert_eq!(slice.len(), 24);
        assert_eq!(slice, &hours[24..]);
    }

    #[test]
    fn slice_past_the_end_is_empty() {
        let hours: Vec<u32> = (0..24).collect();

        assert!(upcoming_hours(&hours, 23).is_empty());
        assert!(upcoming_hours(&hours[..5], 10).is_empty());
        assert!(upcoming_hours::<u32>(&[], 0).is_empty());
    }

    #[test]
    fn time_label_drops_date() {
        assert_eq!(time_label("2024-06-01 14:00"), "14:00");
        assert_eq!(time_label("2024-06-01"), "");
        assert_eq!(time_label(""), "");
    }

    #[test]
    fn temperatures_truncate_toward_zero() {
        assert_eq!(truncate_temp(23.9), 23);
        assert_eq!(truncate_temp(-0.5), 0);
        assert_eq!(truncate_temp(-3.7), -3);
        assert_eq!(truncate_temp(0.0), 0);
    }

    #[test]
    fn icon_url_prefixes_scheme() {
        assert_eq!(
            icon_url("//cdn.weatherapi.com/weather/64x64/day/113.png"),
            "https://cdn.weatherapi.com/weather/64x64/day/113.png"
        );
    }

    #[test]
    fn section_from_snapshot() {
        let section = WeatherSection::build(&sample_snapshot(), at(10));

        assert_eq!(
            section.current,
            CurrentPanel {
                temperature: 23,
                condition: "Sunny".into(),
                date_label: "Jun 1 Sat".into(),
                high: Some(30),
                low: Some(19),
                feels_like: 25,
                humidity: 40,
                wind_kph: 7,
                last_updated: "2024-06-01 10:00".into(),
                location: "Kolkata, West Bengal, India".into(),
                local_time: "2024-06-01 10:05 Asia/Kolkata".into(),
            }
        );
        // One forecast day of 24 hours, 11 of them already past.
        assert_eq!(section.hours.len(), 13);
        assert_eq!(section.hours[0].time_label, "11:00");
        assert_eq!(section.hours[0].temperature, 25);
        assert_eq!(section.hours[0].icon_url, "https://cdn.weatherapi.com/weather/64x64/day/113.png");
    }

    #[test]
    fn section_without_forecast_days_has_no_high_low() {
        let mut snapshot = sample_snapshot();
        snapshot.forecast.forecastday.clear();

        let section = WeatherSection::build(&snapshot, at(0));

        assert_eq!(section.current.high, None);
        assert_eq!(section.current.low, None);
        assert!(section.hours.is_empty());
    }

    #[test]
    fn blank_location_parts_are_skipped() {
        let mut snapshot = sample_snapshot();
        snapshot.location.region.clear();
        snapshot.location.tz_id.clear();
        snapshot.location.localtime.clear();

        let section = WeatherSection::build(&snapshot, at(0));

        assert_eq!(section.current.location, "Kolkata, India");
        assert_eq!(section.current.local_time, "");
    }

    #[test]
    fn home_screen_carries_error_through() {
        let screen = HomeScreen::new("Kolkata", Resource::error("offline"), at(3));

        assert_eq!(screen.top.city, "Kolkata");
        assert_eq!(screen.bottom, Resource::Error("offline".into()));
    }

    /// Repository that blocks until released, recording whether it completed.
    #[derive(Debug, Default)]
    struct GatedRepository {
        gate: Notify,
        finished: AtomicBool,
    }

    #[async_trait]
    impl WeatherRepository for GatedRepository {
        async fn get_weather_data(&self, _api_key: &str, _city: &str) -> Resource<WeatherSnapshot> {
            self.gate.notified().await;
            self.finished.store(true, Ordering::SeqCst);
            Resource::Success(sample_snapshot())
        }
    }

    #[tokio::test]
    async fn bottom_section_is_loading_until_fetch_settles() {
        let repo = Arc::new(GatedRepository::default());
        let vm = WeatherHomeViewModel::new(repo.clone());

        let mut bottom = BottomSection::launch(vm, "KEY".into(), "Kolkata".into());
        assert!(bottom.state().is_loading());

        repo.gate.notify_one();
        let settled = bottom.settled().await;

        assert_eq!(settled, Resource::Success(sample_snapshot()));
        assert_eq!(bottom.state(), settled);
    }

    #[tokio::test]
    async fn dropping_bottom_section_aborts_fetch() {
        let repo = Arc::new(GatedRepository::default());
        let vm = WeatherHomeViewModel::new(repo.clone());

        let bottom = BottomSection::launch(vm, "KEY".into(), "Kolkata".into());
        tokio::task::yield_now().await;
        drop(bottom);

        repo.gate.notify_one();
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(!repo.finished.load(Ordering::SeqCst));
    }
}
