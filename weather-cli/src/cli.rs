use std::{
    io::{self, IsTerminal, Write},
    sync::Arc,
};

use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};
use crossterm::{
    cursor::MoveToPreviousLine,
    queue,
    terminal::{Clear, ClearType},
};
use inquire::{Password, PasswordDisplayMode, Text};
use weather_core::{
    BottomSection, Config, HomeScreen, RemoteWeatherRepository, WeatherHomeViewModel,
    remote::client_from_config, screen::TopSection,
};

use crate::render::{self, RenderOptions};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather and upcoming hours for your city")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the WeatherAPI.com key and the city to show.
    Configure,

    /// Show current conditions and the upcoming hourly forecast.
    Show {
        /// Also list the icon URL of every hourly forecast.
        #[arg(long)]
        icons: bool,

        /// Width in columns to wrap the hourly strip to.
        #[arg(long, default_value_t = 80)]
        width: usize,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { icons, width } => show(icons, width).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("WeatherAPI.com key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let city = Text::new("City:")
        .with_default(&config.city)
        .prompt()
        .context("Failed to read city")?;

    config.set_api_key(api_key.trim().to_string());
    config.city = city.trim().to_string();

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}

async fn show(icons: bool, width: usize) -> anyhow::Result<()> {
    let config = Config::load()?;
    let api_key = config.resolve_api_key()?;
    let client = client_from_config(&config)?;

    let view_model = WeatherHomeViewModel::new(Arc::new(RemoteWeatherRepository::new(client)));
    let mut bottom = BottomSection::launch(view_model, api_key, config.city.clone());

    let mut out = io::stdout();
    let interactive = out.is_terminal();
    let opts = RenderOptions { width, show_icons: icons, color: interactive };

    // Always paint Loading first; that line is replaced below.
    render::initial_screen(&mut out, &TopSection { city: config.city.clone() }, &opts)?;
    out.flush()?;

    let state = bottom.settled().await;

    if interactive {
        // Replace the loading line in place.
        queue!(out, MoveToPreviousLine(1), Clear(ClearType::CurrentLine))?;
    }
    let screen = HomeScreen::new(config.city.as_str(), state, Local::now().naive_local());
    render::bottom_section(&mut out, &screen.bottom, &opts)?;
    out.flush()?;

    Ok(())
}
