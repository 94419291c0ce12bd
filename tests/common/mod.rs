// tests/common/mod.rs
// Shared builders: stub models plus fixture-mode providers, no network.
#![allow(dead_code)]

use std::sync::Arc;

use crop_advisor::config::YieldDefaults;
use crop_advisor::forecast::ForecastService;
use crop_advisor::models::{StubClassifier, StubYieldModel};
use crop_advisor::providers::{IpInfoLocator, OpenMeteoProvider, WeatherApiProvider};
use crop_advisor::recommend::RecommendationEngine;
use crop_advisor::AppState;

pub const WEATHERAPI_PUNE: &str = include_str!("../fixtures/weatherapi_pune.json");
pub const IPINFO: &str = include_str!("../fixtures/ipinfo.json");
pub const OPEN_METEO_DAILY: &str = include_str!("../fixtures/open_meteo_daily.json");

/// rice > maize > jute; jute has no yield entry and falls back to the default.
pub fn stub_engine() -> RecommendationEngine {
    RecommendationEngine::new(
        Arc::new(StubClassifier::new(&[
            ("maize", 0.20),
            ("jute", 0.05),
            ("rice", 0.70),
            ("chickpea", 0.05),
        ])),
        Arc::new(
            StubYieldModel::new()
                .with_total("rice", 2650.0)
                .with_total("maize", 2800.0)
                .failing_on("jute"),
        ),
        YieldDefaults::default(),
    )
}

pub fn fixture_forecast(weather_body: &str) -> ForecastService {
    ForecastService::new(
        Arc::new(IpInfoLocator::from_fixture(IPINFO)),
        Arc::new(WeatherApiProvider::from_fixture(weather_body)),
        Arc::new(OpenMeteoProvider::from_fixture(OPEN_METEO_DAILY)),
        3,
    )
}

pub fn fixture_state() -> AppState {
    AppState::new(stub_engine(), fixture_forecast(WEATHERAPI_PUNE))
}
