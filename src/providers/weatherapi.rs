// src/providers/weatherapi.rs
use async_trait::async_trait;

use crate::config::ForecastConfig;
use crate::error::{AdvisorError, AdvisorResult};
use crate::forecast::types::RawForecast;
use crate::providers::{get_text, http_client, ForecastProvider};

const NAME: &str = "weatherapi";

/// Hourly forecast from weatherapi.com (`/v1/forecast.json`).
pub struct WeatherApiProvider {
    mode: Mode,
}

enum Mode {
    // Owned copy so tests can build bodies at runtime.
    Fixture(String),
    Http {
        url: String,
        api_key: String,
        client: reqwest::Client,
    },
}

impl WeatherApiProvider {
    pub fn from_fixture(body: impl Into<String>) -> Self {
        Self {
            mode: Mode::Fixture(body.into()),
        }
    }

    pub fn from_config(cfg: &ForecastConfig) -> anyhow::Result<Self> {
        let api_key = std::env::var(&cfg.api_key_env).unwrap_or_default();
        if api_key.is_empty() {
            tracing::warn!(env = %cfg.api_key_env, "weather API key not set; requests will be rejected");
        }
        Ok(Self {
            mode: Mode::Http {
                url: cfg.weather_api_url.clone(),
                api_key,
                client: http_client(cfg.timeout_secs)?,
            },
        })
    }

    pub fn parse(body: &str) -> AdvisorResult<RawForecast> {
        serde_json::from_str(body)
            .map_err(|e| AdvisorError::malformed(format!("{NAME} forecast body: {e}")))
    }
}

#[async_trait]
impl ForecastProvider for WeatherApiProvider {
    async fn fetch_forecast(&self, location: &str, days: u8) -> AdvisorResult<RawForecast> {
        match &self.mode {
            Mode::Fixture(body) => Self::parse(body),
            Mode::Http {
                url,
                api_key,
                client,
            } => {
                let days = days.to_string();
                let request = client.get(url).query(&[
                    ("key", api_key.as_str()),
                    ("q", location),
                    ("days", days.as_str()),
                    ("aqi", "no"),
                    ("alerts", "no"),
                ]);
                let body = get_text(NAME, request).await?;
                Self::parse(&body)
            }
        }
    }

    fn name(&self) -> &'static str {
        NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
        "location": { "name": "Pune" },
        "forecast": { "forecastday": [
            { "date": "2030-06-01", "hour": [
                { "time": "2030-06-01 00:00", "temp_c": 24.1, "precip_mm": 0.0,
                  "condition": { "text": "Clear", "icon": "//cdn/113.png" }, "humidity": 80 }
            ] }
        ] }
    }"#;

    #[tokio::test]
    async fn fixture_mode_parses_like_http_body() {
        let p = WeatherApiProvider::from_fixture(BODY);
        let raw = p.fetch_forecast("Pune", 3).await.unwrap();
        assert_eq!(raw.location.unwrap().name, "Pune");
        assert_eq!(raw.forecast.forecastday[0].hour[0].condition.text, "Clear");
    }

    #[tokio::test]
    async fn unexpected_shape_is_malformed() {
        let p = WeatherApiProvider::from_fixture(r#"{"error":{"code":1006}}"#);
        let err = p.fetch_forecast("Nowhere", 3).await.unwrap_err();
        assert!(matches!(err, AdvisorError::MalformedProviderData(_)));
    }
}
