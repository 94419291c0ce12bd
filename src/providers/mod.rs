// src/providers/mod.rs
//! Network collaborators: IP geolocation, hourly forecast, daily outlook.
//!
//! Each provider has a fixture mode (static body, same parsing path) and an HTTP mode.
//! Timeouts live in the HTTP client; nothing here retries.

pub mod ipinfo;
pub mod open_meteo;
pub mod weatherapi;

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

use crate::error::AdvisorResult;
use crate::forecast::types::{RawDailyForecast, RawForecast};

pub use ipinfo::IpInfoLocator;
pub use open_meteo::OpenMeteoProvider;
pub use weatherapi::WeatherApiProvider;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
}

#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn locate(&self) -> AdvisorResult<Location>;
    fn name(&self) -> &'static str;
}

#[async_trait]
pub trait ForecastProvider: Send + Sync {
    /// Raw hourly series for `location` (a city name or "lat,lon"), `days` days ahead.
    async fn fetch_forecast(&self, location: &str, days: u8) -> AdvisorResult<RawForecast>;
    fn name(&self) -> &'static str;
}

#[async_trait]
pub trait OutlookProvider: Send + Sync {
    async fn fetch_daily(&self, latitude: f64, longitude: f64) -> AdvisorResult<RawDailyForecast>;
    fn name(&self) -> &'static str;
}

/// Shared client setup for all HTTP-mode providers.
pub(crate) fn http_client(timeout_secs: u64) -> anyhow::Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(concat!("crop-advisor/", env!("CARGO_PKG_VERSION")))
        .connect_timeout(Duration::from_secs(4))
        .timeout(Duration::from_secs(timeout_secs.max(1)))
        .build()?;
    Ok(client)
}

/// GET + status check + body text; every failure here is `ProviderUnavailable`.
pub(crate) async fn get_text(
    provider: &'static str,
    request: reqwest::RequestBuilder,
) -> AdvisorResult<String> {
    use crate::error::AdvisorError;
    use metrics::counter;

    let resp = match request.send().await {
        Ok(resp) => resp,
        Err(e) => {
            tracing::warn!(error = ?e, provider, "provider http error");
            counter!("provider_errors_total", "provider" => provider).increment(1);
            return Err(AdvisorError::provider(provider, e));
        }
    };

    let status = resp.status();
    if !status.is_success() {
        tracing::warn!(status = status.as_u16(), provider, "provider returned non-success status");
        counter!("provider_errors_total", "provider" => provider).increment(1);
        return Err(AdvisorError::provider(
            provider,
            format!("status {}", status.as_u16()),
        ));
    }

    resp.text().await.map_err(|e| {
        counter!("provider_errors_total", "provider" => provider).increment(1);
        AdvisorError::provider(provider, e)
    })
}
