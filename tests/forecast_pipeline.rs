// tests/forecast_pipeline.rs
// Forecast service over fixture providers, plus normalizer invariants on generated series.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crop_advisor::alerts::{classify, AlertLabel};
use crop_advisor::forecast::types::RawForecast;
use crop_advisor::forecast::{assemble, ForecastService, STEP_HOURS};
use crop_advisor::providers::{Geolocator, Location, OpenMeteoProvider, WeatherApiProvider};
use crop_advisor::{AdvisorError, AdvisorResult};

fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
}

struct DownLocator;

#[async_trait]
impl Geolocator for DownLocator {
    async fn locate(&self) -> AdvisorResult<Location> {
        Err(AdvisorError::provider("ipinfo", "connection refused"))
    }
    fn name(&self) -> &'static str {
        "down"
    }
}

#[tokio::test]
async fn forecast_from_mid_morning_keeps_three_hour_marks() {
    let service = common::fixture_forecast(common::WEATHERAPI_PUNE);
    let fc = service
        .forecast(Some("Pune"), at("2099-06-01 09:00"))
        .await
        .unwrap();

    let hours: Vec<u32> = fc
        .report
        .entries
        .iter()
        .map(|e| e.sample.timestamp.hour())
        .collect();
    // 08:00 is in the past, 10:00 is off-step
    assert_eq!(hours, [9, 12, 15, 21, 0, 3]);
    assert_eq!(fc.report.alert_count(), 3);

    let dates: Vec<(NaiveDate, usize)> = fc
        .report
        .by_date()
        .map(|(d, entries)| (d, entries.len()))
        .collect();
    assert_eq!(
        dates,
        [
            (NaiveDate::from_ymd_opt(2099, 6, 1).unwrap(), 4),
            (NaiveDate::from_ymd_opt(2099, 6, 2).unwrap(), 2),
        ]
    );
}

#[tokio::test]
async fn forecast_after_last_sample_is_empty_not_an_error() {
    let service = common::fixture_forecast(common::WEATHERAPI_PUNE);
    let fc = service
        .forecast(Some("Pune"), at("2099-06-03 00:00"))
        .await
        .unwrap();
    assert!(fc.report.entries.is_empty());
    assert!(fc.report.groups.is_empty());
}

#[tokio::test]
async fn geolocation_failure_propagates_as_provider_unavailable() {
    let service = ForecastService::new(
        Arc::new(DownLocator),
        Arc::new(WeatherApiProvider::from_fixture(common::WEATHERAPI_PUNE)),
        Arc::new(OpenMeteoProvider::from_fixture(common::OPEN_METEO_DAILY)),
        3,
    );
    let err = service.forecast(None, at("2099-06-01 00:00")).await.unwrap_err();
    assert!(matches!(
        err,
        AdvisorError::ProviderUnavailable { provider: "ipinfo", .. }
    ));
    assert!(service.outlook().await.is_err());

    // an explicit city never touches the locator
    assert!(service
        .forecast(Some("Pune"), at("2099-06-01 00:00"))
        .await
        .is_ok());
}

fn random_series(rng: &mut impl Rng, start: NaiveDateTime, hours: i64) -> RawForecast {
    let mut days: Vec<serde_json::Value> = Vec::new();
    for h in 0..hours {
        let ts = start + Duration::hours(h);
        let date = ts.date().to_string();
        if days.last().map(|d| d["date"] != date.as_str()).unwrap_or(true) {
            days.push(serde_json::json!({ "date": date, "hour": [] }));
        }
        let cond = if rng.random_bool(0.1) { "Thunderstorm" } else { "Cloudy" };
        let hour = serde_json::json!({
            "time": ts.format("%Y-%m-%d %H:%M").to_string(),
            "temp_c": rng.random_range(10.0..40.0_f64),
            "precip_mm": rng.random_range(0.0..150.0_f64),
            "condition": { "text": cond },
        });
        days.last_mut().unwrap()["hour"]
            .as_array_mut()
            .unwrap()
            .push(hour);
    }
    serde_json::from_value(serde_json::json!({ "forecast": { "forecastday": days } })).unwrap()
}

#[test]
fn normalized_output_is_future_stepped_sorted_and_classified() {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    let start = at("2099-01-01 00:00");
    for _ in 0..50 {
        let hours = rng.random_range(1..96);
        let raw = random_series(&mut rng, start, hours);
        let now = start + Duration::hours(rng.random_range(0..72));
        let report = assemble(&raw, now).unwrap();

        for e in &report.entries {
            assert!(e.sample.timestamp >= now);
            assert_eq!(e.sample.timestamp.hour() % STEP_HOURS, 0);
            assert_eq!(e.alert, classify(e.sample.precipitation_mm, &e.sample.condition));
        }
        assert!(report
            .entries
            .windows(2)
            .all(|w| w[0].sample.timestamp <= w[1].sample.timestamp));

        let covered: usize = report.groups.iter().map(|g| g.len).sum();
        assert_eq!(covered, report.entries.len());
        assert!(report.groups.windows(2).all(|w| w[0].date < w[1].date));
        for (date, entries) in report.by_date() {
            assert!(!entries.is_empty());
            assert!(entries.iter().all(|e| e.sample.timestamp.date() == date));
        }
    }
}

#[test]
fn storm_wording_only_matters_below_heavy_rain() {
    assert_eq!(classify(70.0, "Thunderstorm"), AlertLabel::HeavyRainfall);
    assert_eq!(classify(120.0, "Thunderstorm"), AlertLabel::VeryHeavyRainfall);
    assert_eq!(classify(12.0, "Thunderstorm"), AlertLabel::StormCondition);
}
