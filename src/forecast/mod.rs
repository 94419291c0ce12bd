// src/forecast/mod.rs
//! Forecast pipeline: locate → fetch → normalize → annotate with alerts.

pub mod assemble;
pub mod normalize;
pub mod types;

use chrono::NaiveDateTime;
use metrics::counter;
use std::sync::Arc;

use crate::error::AdvisorResult;
use crate::providers::{ForecastProvider, Geolocator, Location, OutlookProvider};

pub use assemble::{assemble, assemble_outlook, group_by_date, ForecastReport};
pub use normalize::{normalize, parse_timestamp, STEP_HOURS, TIMESTAMP_FORMAT};
pub use types::{AnnotatedForecastEntry, DailyOutlook, DateGroup, ForecastSample};

#[derive(Debug, Clone)]
pub struct CityForecast {
    pub city: String,
    /// Present when the city came from geolocation rather than the caller.
    pub location: Option<Location>,
    pub report: ForecastReport,
}

#[derive(Debug, Clone)]
pub struct CityOutlook {
    pub location: Location,
    pub days: Vec<DailyOutlook>,
}

pub struct ForecastService {
    geolocator: Arc<dyn Geolocator>,
    provider: Arc<dyn ForecastProvider>,
    outlook: Arc<dyn OutlookProvider>,
    days: u8,
}

impl ForecastService {
    pub fn new(
        geolocator: Arc<dyn Geolocator>,
        provider: Arc<dyn ForecastProvider>,
        outlook: Arc<dyn OutlookProvider>,
        days: u8,
    ) -> Self {
        Self {
            geolocator,
            provider,
            outlook,
            days,
        }
    }

    pub fn days(&self) -> u8 {
        self.days
    }

    /// Alert-annotated 3-hourly forecast from `now` on. Without `city`, the caller's IP
    /// location is used.
    pub async fn forecast(
        &self,
        city: Option<&str>,
        now: NaiveDateTime,
    ) -> AdvisorResult<CityForecast> {
        counter!("weather_requests_total").increment(1);

        let (city, location) = match city.map(str::trim).filter(|c| !c.is_empty()) {
            Some(c) => (c.to_string(), None),
            None => {
                let loc = self.geolocator.locate().await?;
                tracing::debug!(provider = self.geolocator.name(), city = %loc.city, "located caller");
                (loc.city.clone(), Some(loc))
            }
        };

        let raw = self.provider.fetch_forecast(&city, self.days).await?;
        let report = assemble(&raw, now)?;

        for e in report.entries.iter().filter(|e| e.alert.is_alert()) {
            counter!("forecast_alerts_total", "level" => e.alert.as_str()).increment(1);
        }
        tracing::info!(
            target: "forecast",
            %city,
            entries = report.entries.len(),
            alerts = report.alert_count(),
            "forecast assembled"
        );

        Ok(CityForecast {
            city,
            location,
            report,
        })
    }

    /// Daily outlook for the caller's IP location.
    pub async fn outlook(&self) -> AdvisorResult<CityOutlook> {
        let location = self.geolocator.locate().await?;
        let raw = self
            .outlook
            .fetch_daily(location.latitude, location.longitude)
            .await?;
        let days = assemble_outlook(&raw)?;
        tracing::info!(
            target: "forecast",
            city = %location.city,
            days = days.len(),
            provider = self.outlook.name(),
            "outlook assembled"
        );
        Ok(CityOutlook { location, days })
    }
}
