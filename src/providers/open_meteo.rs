// src/providers/open_meteo.rs
use async_trait::async_trait;

use crate::config::OutlookConfig;
use crate::error::{AdvisorError, AdvisorResult};
use crate::forecast::types::RawDailyForecast;
use crate::providers::{get_text, http_client, OutlookProvider};

const NAME: &str = "open-meteo";
const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,precipitation_sum,weathercode";

/// Daily aggregates from Open-Meteo (no key required).
pub struct OpenMeteoProvider {
    mode: Mode,
}

enum Mode {
    Fixture(String),
    Http { url: String, client: reqwest::Client },
}

impl OpenMeteoProvider {
    pub fn from_fixture(body: impl Into<String>) -> Self {
        Self {
            mode: Mode::Fixture(body.into()),
        }
    }

    pub fn from_config(cfg: &OutlookConfig) -> anyhow::Result<Self> {
        Ok(Self {
            mode: Mode::Http {
                url: cfg.url.clone(),
                client: http_client(cfg.timeout_secs)?,
            },
        })
    }

    pub fn parse(body: &str) -> AdvisorResult<RawDailyForecast> {
        serde_json::from_str(body)
            .map_err(|e| AdvisorError::malformed(format!("{NAME} daily body: {e}")))
    }
}

#[async_trait]
impl OutlookProvider for OpenMeteoProvider {
    async fn fetch_daily(&self, latitude: f64, longitude: f64) -> AdvisorResult<RawDailyForecast> {
        match &self.mode {
            Mode::Fixture(body) => Self::parse(body),
            Mode::Http { url, client } => {
                let (lat, lon) = (latitude.to_string(), longitude.to_string());
                let request = client.get(url).query(&[
                    ("latitude", lat.as_str()),
                    ("longitude", lon.as_str()),
                    ("daily", DAILY_FIELDS),
                    ("timezone", "auto"),
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
