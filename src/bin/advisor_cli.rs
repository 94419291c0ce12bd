//! Terminal client for the advisor pipelines, no server required.
//!
//! Usage:
//! ```bash
//! # 3-hourly forecast with rainfall alerts for the caller's IP location
//! advisor-cli forecast
//!
//! # Same, for a named city
//! advisor-cli forecast --city Pune
//!
//! # Daily storm/rain outlook
//! advisor-cli outlook
//!
//! # Top 3 crops for a soil sample, with a 2.5 ha production projection
//! advisor-cli recommend --n 90 --p 42 --k 43 --temperature 20.9 --humidity 82 \
//!     --ph 6.5 --rainfall 202.9 --field-size 2.5
//! ```

use std::io::IsTerminal;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};

use crop_advisor::alerts::{AlertLabel, DailyAlert};
use crop_advisor::config::AdvisorConfig;
use crop_advisor::forecast::{CityForecast, ForecastService};
use crop_advisor::logging::init_tracing;
use crop_advisor::models::{GaussianNbClassifier, OneHotLinearYield};
use crop_advisor::providers::{IpInfoLocator, OpenMeteoProvider, WeatherApiProvider};
use crop_advisor::recommend::{RecommendationEngine, SoilSample};

const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

#[derive(Parser)]
#[command(
    name = "advisor-cli",
    about = "Crop recommendations and rainfall alerts from the terminal"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging on stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// 3-hourly forecast with IMD rainfall alerts
    Forecast {
        /// City to forecast (defaults to the IP-geolocated city)
        #[arg(long)]
        city: Option<String>,
    },

    /// Daily storm/rain outlook for the IP-geolocated location
    Outlook,

    /// Top 3 crops with estimated yield
    Recommend {
        #[arg(long = "n")]
        nitrogen: f64,
        #[arg(long = "p")]
        phosphorus: f64,
        #[arg(long = "k")]
        potassium: f64,
        #[arg(long)]
        temperature: f64,
        #[arg(long)]
        humidity: f64,
        #[arg(long)]
        ph: f64,
        #[arg(long)]
        rainfall: f64,
        /// Field size in hectares for a production projection
        #[arg(long = "field-size")]
        field_size: Option<f64>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_tracing(if cli.verbose { "debug" } else { "error" });

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command) -> anyhow::Result<()> {
    let cfg = AdvisorConfig::load_default()?;
    let color = std::io::stdout().is_terminal();

    match command {
        Command::Forecast { city } => {
            let service = forecast_service(&cfg)?;
            let now = Local::now().naive_local();
            let fc = service.forecast(city.as_deref(), now).await?;
            print_forecast(&fc, service.days(), color);
        }
        Command::Outlook => {
            let service = forecast_service(&cfg)?;
            let o = service.outlook().await?;
            println!(
                "🧭 Your Approximate Location: {} ({}, {})",
                o.location.city, o.location.latitude, o.location.longitude
            );
            println!("📍 Daily Outlook for {}:", o.location.city);
            for d in &o.days {
                let alert = outlook_alert(d.alert, color);
                println!(
                    "📅 {} | 🌡️ {:.1}°C / {:.1}°C | ☔ Rain: {:.1}mm | code {} {}",
                    d.date, d.max_temp_c, d.min_temp_c, d.precipitation_sum_mm, d.weather_code, alert
                );
            }
        }
        Command::Recommend {
            nitrogen,
            phosphorus,
            potassium,
            temperature,
            humidity,
            ph,
            rainfall,
            field_size,
        } => {
            let engine = recommendation_engine(&cfg)?;
            let sample = SoilSample {
                nitrogen,
                phosphorus,
                potassium,
                temperature,
                humidity,
                ph,
                rainfall,
            };
            let crops = engine.recommend(&sample, field_size)?;
            println!(
                "🌱 Recommended crops ({} season, yield per {} ha):",
                engine.yield_defaults().season,
                engine.yield_defaults().area_ha
            );
            for (i, c) in crops.iter().enumerate() {
                print!(
                    "{}. {} {} [{}] | Yield: {} t | {} t/ha",
                    i + 1,
                    c.icon,
                    c.name,
                    c.status.as_str(),
                    c.yield_total,
                    c.yield_per_ha
                );
                match c.projected_production {
                    Some(p) => println!(" | Projected: {p} t"),
                    None => println!(),
                }
            }
        }
    }
    Ok(())
}

fn forecast_service(cfg: &AdvisorConfig) -> anyhow::Result<ForecastService> {
    Ok(ForecastService::new(
        Arc::new(IpInfoLocator::from_config(&cfg.forecast)?),
        Arc::new(WeatherApiProvider::from_config(&cfg.forecast)?),
        Arc::new(OpenMeteoProvider::from_config(&cfg.outlook)?),
        cfg.forecast.days,
    ))
}

fn recommendation_engine(cfg: &AdvisorConfig) -> anyhow::Result<RecommendationEngine> {
    let classifier = GaussianNbClassifier::load(&cfg.models.classifier_path)
        .context("crop classifier unavailable")?;
    let yield_model =
        OneHotLinearYield::load(&cfg.models.yield_path).context("yield model unavailable")?;
    Ok(RecommendationEngine::new(
        Arc::new(classifier),
        Arc::new(yield_model),
        cfg.yield_defaults.clone(),
    ))
}

fn print_forecast(fc: &CityForecast, days: u8, color: bool) {
    if let Some(loc) = &fc.location {
        println!(
            "🧭 Your Approximate Location: {} ({}, {})",
            loc.city, loc.latitude, loc.longitude
        );
    }
    println!(
        "\n📍 {days}-Day Forecast for {} (Every 3 Hours From Now):",
        fc.city
    );

    for (date, entries) in fc.report.by_date() {
        println!("\n📅 Date: {date}");
        for e in entries {
            let s = &e.sample;
            let alert = match e.alert {
                AlertLabel::None => String::new(),
                AlertLabel::StormCondition => paint(e.alert.message(), YELLOW, color),
                _ => paint(e.alert.message(), RED, color),
            };
            println!(
                "{} ⏰ | 🌡️ Temp: {}°C | ☔ Rain: {}mm | 🌥️ {} {}",
                s.timestamp.format("%H:%M"),
                s.temperature_c,
                s.precipitation_mm,
                s.condition,
                alert
            );
        }
    }
}

/// Storm/rain days are shown in red, like hourly rainfall alerts.
fn outlook_alert(alert: DailyAlert, color: bool) -> String {
    paint(alert.message(), RED, color && alert.is_alert())
}

fn paint(text: &str, code: &str, enabled: bool) -> String {
    if enabled {
        format!("{code}{text}{RESET}")
    } else {
        text.to_string()
    }
}
