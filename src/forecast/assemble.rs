// src/forecast/assemble.rs
//! Normalized samples + alert rules → annotated schedule grouped by date.

use chrono::{NaiveDate, NaiveDateTime};

use crate::alerts::{self, classify_daily};
use crate::error::{AdvisorError, AdvisorResult};
use crate::forecast::normalize::normalize;
use crate::forecast::types::{
    AnnotatedForecastEntry, DailyOutlook, DateGroup, RawDailyForecast, RawForecast,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastReport {
    pub entries: Vec<AnnotatedForecastEntry>,
    pub groups: Vec<DateGroup>,
}

impl ForecastReport {
    /// `(date, entries)` pairs in chronological order.
    pub fn by_date(&self) -> impl Iterator<Item = (NaiveDate, &[AnnotatedForecastEntry])> + '_ {
        self.groups
            .iter()
            .map(|g| (g.date, &self.entries[g.start..g.start + g.len]))
    }

    pub fn alert_count(&self) -> usize {
        self.entries.iter().filter(|e| e.alert.is_alert()).count()
    }
}

pub fn assemble(raw: &RawForecast, now: NaiveDateTime) -> AdvisorResult<ForecastReport> {
    let entries: Vec<AnnotatedForecastEntry> = normalize(raw, now)?
        .into_iter()
        .map(|sample| {
            let alert = alerts::classify(sample.precipitation_mm, &sample.condition);
            AnnotatedForecastEntry { sample, alert }
        })
        .collect();
    let groups = group_by_date(&entries);
    Ok(ForecastReport { entries, groups })
}

/// One group per date that has at least one entry; expects chronological input.
pub fn group_by_date(entries: &[AnnotatedForecastEntry]) -> Vec<DateGroup> {
    let mut groups: Vec<DateGroup> = Vec::new();
    for (i, e) in entries.iter().enumerate() {
        let date = e.sample.timestamp.date();
        if let Some(g) = groups.last_mut().filter(|g| g.date == date) {
            g.len += 1;
        } else {
            groups.push(DateGroup {
                date,
                start: i,
                len: 1,
            });
        }
    }
    groups
}

/// Zip Open-Meteo's column arrays into per-day rows with the daily alert applied.
pub fn assemble_outlook(raw: &RawDailyForecast) -> AdvisorResult<Vec<DailyOutlook>> {
    let d = &raw.daily;
    let n = d.time.len();
    if [
        d.temperature_2m_max.len(),
        d.temperature_2m_min.len(),
        d.precipitation_sum.len(),
        d.weathercode.len(),
    ]
    .iter()
    .any(|&len| len != n)
    {
        return Err(AdvisorError::malformed("daily columns differ in length"));
    }

    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let date = NaiveDate::parse_from_str(&d.time[i], "%Y-%m-%d")
            .map_err(|e| AdvisorError::malformed(format!("daily date '{}': {e}", d.time[i])))?;
        let missing = || AdvisorError::malformed(format!("missing daily value for {date}"));
        let max_temp_c = d.temperature_2m_max[i].ok_or_else(missing)?;
        let min_temp_c = d.temperature_2m_min[i].ok_or_else(missing)?;
        let precipitation_sum_mm = d.precipitation_sum[i].ok_or_else(missing)?;
        let weather_code = d.weathercode[i].ok_or_else(missing)?;
        out.push(DailyOutlook {
            date,
            max_temp_c,
            min_temp_c,
            precipitation_sum_mm,
            weather_code,
            alert: classify_daily(precipitation_sum_mm, weather_code),
        });
    }
    Ok(out)
}
