//! Terminal layout of the home screen.

use std::io::{self, Write};

use crossterm::style::Stylize;
use weather_core::{
    Resource,
    screen::{CurrentPanel, HourTile, TopSection, WeatherSection},
};

/// Columns taken by one hourly tile, gap included.
const TILE_WIDTH: usize = 9;

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub width: usize,
    pub show_icons: bool,
    pub color: bool,
}

pub fn top_section(out: &mut impl Write, top: &TopSection) -> io::Result<()> {
    writeln!(out, "{}  🏙", top.city)?;
    writeln!(out)
}

/// First paint: the header over a loading bottom section, whatever the fetch is doing.
pub fn initial_screen(out: &mut impl Write, top: &TopSection, opts: &RenderOptions) -> io::Result<()> {
    top_section(out, top)?;
    bottom_section(out, &Resource::Loading, opts)
}

pub fn bottom_section(
    out: &mut impl Write,
    bottom: &Resource<WeatherSection>,
    opts: &RenderOptions,
) -> io::Result<()> {
    match bottom {
        Resource::Loading => writeln!(out, "Loading…"),
        Resource::Error(message) if opts.color => writeln!(out, "{}", message.as_str().red()),
        Resource::Error(message) => writeln!(out, "{message}"),
        Resource::Success(section) => weather_section(out, section, opts),
    }
}

fn weather_section(out: &mut impl Write, section: &WeatherSection, opts: &RenderOptions) -> io::Result<()> {
    current_panel(out, &section.current, opts)?;
    writeln!(out)?;

    if section.hours.is_empty() {
        writeln!(out, "No upcoming hours in this forecast.")?;
    } else {
        hourly_strip(out, &section.hours, opts.width)?;
    }

    if opts.show_icons {
        for tile in &section.hours {
            writeln!(out, "{}  {}", tile.time_label, tile.icon_url)?;
        }
        writeln!(out)?;
    }

    writeln!(out, "{}", "─".repeat(opts.width.max(TILE_WIDTH)))
}

fn current_panel(out: &mut impl Write, current: &CurrentPanel, opts: &RenderOptions) -> io::Result<()> {
    let temperature = format!("{}°C", current.temperature);
    if opts.color {
        writeln!(out, "{}  {}", temperature.as_str().bold(), current.condition.as_str().bold())?;
    } else {
        writeln!(out, "{temperature}  {}", current.condition)?;
    }

    match (current.high, current.low) {
        (Some(high), Some(low)) => writeln!(out, "{}   {high}/{low}", current.date_label)?,
        _ => writeln!(out, "{}", current.date_label)?,
    }

    writeln!(
        out,
        "Feels like {}°C · Humidity {}% · Wind {} km/h",
        current.feels_like, current.humidity, current.wind_kph
    )?;

    let place = [current.location.as_str(), current.local_time.as_str()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" · ");
    if !place.is_empty() {
        writeln!(out, "{place}")?;
    }
    if !current.last_updated.is_empty() {
        writeln!(out, "Updated {}", current.last_updated)?;
    }

    Ok(())
}

/// Tiles laid out left to right, wrapped into rows of whole tiles.
fn hourly_strip(out: &mut impl Write, hours: &[HourTile], width: usize) -> io::Result<()> {
    let per_row = (width / TILE_WIDTH).max(1);

    for row in hours.chunks(per_row) {
        let line = |cell: fn(&HourTile) -> String| -> String {
            row.iter()
                .map(|tile| format!("{:<TILE_WIDTH$}", cell(tile)))
                .collect::<String>()
                .trim_end()
                .to_string()
        };

        writeln!(out, "{}", line(|t| t.time_label.clone()))?;
        writeln!(out, "{}", line(|t| format!("{}°C", t.temperature)))?;
        writeln!(out, "{}", line(|t| t.condition.chars().take(TILE_WIDTH - 1).collect()))?;
        writeln!(out)?;
    }

    Ok(())
}
