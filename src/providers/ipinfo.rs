// src/providers/ipinfo.rs
use async_trait::async_trait;
use serde::Deserialize;

use crate::config::ForecastConfig;
use crate::error::{AdvisorError, AdvisorResult};
use crate::providers::{get_text, http_client, Geolocator, Location};

const NAME: &str = "ipinfo";

#[derive(Debug, Deserialize)]
struct IpInfo {
    city: Option<String>,
    /// "lat,lon"
    loc: Option<String>,
}

/// Approximate location of the caller's public IP (ipinfo.io).
pub struct IpInfoLocator {
    mode: Mode,
}

enum Mode {
    Fixture(String),
    Http { url: String, client: reqwest::Client },
}

impl IpInfoLocator {
    pub fn from_fixture(body: impl Into<String>) -> Self {
        Self {
            mode: Mode::Fixture(body.into()),
        }
    }

    pub fn from_config(cfg: &ForecastConfig) -> anyhow::Result<Self> {
        Ok(Self {
            mode: Mode::Http {
                url: cfg.geolocation_url.clone(),
                client: http_client(cfg.timeout_secs)?,
            },
        })
    }

    pub fn parse(body: &str) -> AdvisorResult<Location> {
        let info: IpInfo = serde_json::from_str(body)
            .map_err(|e| AdvisorError::malformed(format!("{NAME} body: {e}")))?;

        let city = info
            .city
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| AdvisorError::malformed(format!("{NAME}: missing city")))?;
        let loc = info
            .loc
            .ok_or_else(|| AdvisorError::malformed(format!("{NAME}: missing loc")))?;

        let (lat, lon) = loc
            .split_once(',')
            .ok_or_else(|| AdvisorError::malformed(format!("{NAME}: loc '{loc}'")))?;
        let parse = |s: &str| {
            s.trim()
                .parse::<f64>()
                .map_err(|e| AdvisorError::malformed(format!("{NAME}: loc '{loc}': {e}")))
        };

        Ok(Location {
            latitude: parse(lat)?,
            longitude: parse(lon)?,
            city,
        })
    }
}

#[async_trait]
impl Geolocator for IpInfoLocator {
    async fn locate(&self) -> AdvisorResult<Location> {
        match &self.mode {
            Mode::Fixture(body) => Self::parse(body),
            Mode::Http { url, client } => {
                let body = get_text(NAME, client.get(url)).await?;
                Self::parse(&body)
            }
        }
    }

    fn name(&self) -> &'static str {
        NAME
    }
}
