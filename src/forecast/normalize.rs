// src/forecast/normalize.rs
//! Flatten the provider's per-day hourly series into upcoming 3-hourly samples.

use chrono::{NaiveDateTime, Timelike};

use crate::error::{AdvisorError, AdvisorResult};
use crate::forecast::types::{ForecastSample, RawForecast, RawHour};

/// Provider timestamp layout.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Only samples whose hour is a multiple of this are kept.
pub const STEP_HOURS: u32 = 3;

pub fn parse_timestamp(raw: &str) -> AdvisorResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT)
        .map_err(|e| AdvisorError::malformed(format!("timestamp '{raw}': {e}")))
}

fn to_sample(hour: &RawHour) -> AdvisorResult<ForecastSample> {
    let timestamp = parse_timestamp(&hour.time)?;
    if !hour.precip_mm.is_finite() || hour.precip_mm < 0.0 {
        return Err(AdvisorError::malformed(format!(
            "precipitation {} mm at {}",
            hour.precip_mm, hour.time
        )));
    }
    Ok(ForecastSample {
        timestamp,
        temperature_c: hour.temp_c,
        precipitation_mm: hour.precip_mm,
        condition: hour.condition.text.clone(),
    })
}

/// Keeps samples with `timestamp >= now` on 3-hour boundaries, in chronological order.
///
/// Every hour is parsed, including the ones that end up filtered out: one bad timestamp
/// fails the whole forecast.
pub fn normalize(raw: &RawForecast, now: NaiveDateTime) -> AdvisorResult<Vec<ForecastSample>> {
    let mut out = Vec::new();
    for day in &raw.forecast.forecastday {
        for hour in &day.hour {
            let sample = to_sample(hour)?;
            if sample.timestamp >= now && sample.timestamp.hour() % STEP_HOURS == 0 {
                out.push(sample);
            }
        }
    }
    // Stable; the provider already sends ascending hours.
    out.sort_by_key(|s| s.timestamp);
    Ok(out)
}
