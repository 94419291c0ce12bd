// src/forecast/types.rs
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::alerts::{AlertLabel, DailyAlert};

/// Hourly forecast body as returned by the weather provider (`forecast.json`).
#[derive(Debug, Clone, Deserialize)]
pub struct RawForecast {
    #[serde(default)]
    pub location: Option<RawLocation>,
    pub forecast: RawForecastBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLocation {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawForecastBody {
    pub forecastday: Vec<RawForecastDay>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawForecastDay {
    pub date: String,
    pub hour: Vec<RawHour>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawHour {
    /// Local time, "YYYY-MM-DD HH:MM".
    pub time: String,
    pub temp_c: f64,
    pub precip_mm: f64,
    pub condition: RawCondition,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCondition {
    pub text: String,
}

/// One validated hourly sample.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSample {
    pub timestamp: NaiveDateTime,
    pub temperature_c: f64,
    pub precipitation_mm: f64,
    pub condition: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedForecastEntry {
    pub sample: ForecastSample,
    pub alert: AlertLabel,
}

/// Contiguous run of entries sharing one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateGroup {
    pub date: NaiveDate,
    pub start: usize,
    pub len: usize,
}

// --- daily outlook (Open-Meteo) ---

/// Column-oriented `daily` block; all columns must have the same length.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDailyForecast {
    pub daily: RawDaily,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawDaily {
    pub time: Vec<String>,
    pub temperature_2m_max: Vec<Option<f64>>,
    pub temperature_2m_min: Vec<Option<f64>>,
    pub precipitation_sum: Vec<Option<f64>>,
    pub weathercode: Vec<Option<u16>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyOutlook {
    pub date: NaiveDate,
    pub max_temp_c: f64,
    pub min_temp_c: f64,
    pub precipitation_sum_mm: f64,
    pub weather_code: u16,
    pub alert: DailyAlert,
}
