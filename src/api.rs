use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::alerts::{AlertLabel, DailyAlert};
use crate::config::AdvisorConfig;
use crate::error::AdvisorError;
use crate::forecast::{DateGroup, ForecastService, TIMESTAMP_FORMAT};
use crate::models::{GaussianNbClassifier, OneHotLinearYield};
use crate::providers::{IpInfoLocator, Location, OpenMeteoProvider, WeatherApiProvider};
use crate::recommend::{CropRecommendation, RecommendationEngine, SoilSample};

pub const BANNER: &str = "✅ Crop Recommendation + Yield Prediction API Running";

/// Read-only after startup; cloned per request.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<RecommendationEngine>,
    forecast: Arc<ForecastService>,
}

impl AppState {
    pub fn new(engine: RecommendationEngine, forecast: ForecastService) -> Self {
        Self {
            engine: Arc::new(engine),
            forecast: Arc::new(forecast),
        }
    }

    /// Load models from disk and wire the HTTP providers.
    pub fn from_config(cfg: &AdvisorConfig) -> anyhow::Result<Self> {
        let classifier = GaussianNbClassifier::load(&cfg.models.classifier_path)?;
        let yield_model = OneHotLinearYield::load(&cfg.models.yield_path)?;
        tracing::info!(
            classes = classifier.classes.len(),
            season = %cfg.yield_defaults.season,
            area_ha = cfg.yield_defaults.area_ha,
            "models loaded"
        );
        let engine = RecommendationEngine::new(
            Arc::new(classifier),
            Arc::new(yield_model),
            cfg.yield_defaults.clone(),
        );
        let forecast = ForecastService::new(
            Arc::new(IpInfoLocator::from_config(&cfg.forecast)?),
            Arc::new(WeatherApiProvider::from_config(&cfg.forecast)?),
            Arc::new(OpenMeteoProvider::from_config(&cfg.outlook)?),
            cfg.forecast.days,
        );
        Ok(Self::new(engine, forecast))
    }

    pub fn engine(&self) -> &RecommendationEngine {
        &self.engine
    }

    pub fn forecast(&self) -> &ForecastService {
        &self.forecast
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { BANNER }))
        .route("/health", get(|| async { "ok" }))
        .route("/api/recommend", post(recommend))
        .route("/api/weather", get(weather))
        .route("/api/outlook", get(outlook))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(Deserialize)]
struct RecommendReq {
    #[serde(flatten)]
    soil: SoilSample,
    #[serde(default)]
    field_size_ha: Option<f64>,
}

#[derive(Serialize)]
struct RecommendResp {
    crops: Vec<CropRecommendation>,
}

async fn recommend(
    State(state): State<AppState>,
    body: Result<Json<RecommendReq>, JsonRejection>,
) -> Result<Json<RecommendResp>, AdvisorError> {
    let Json(req) = body.map_err(|e| AdvisorError::InvalidInput(e.body_text()))?;
    let crops = state.engine.recommend(&req.soil, req.field_size_ha)?;
    Ok(Json(RecommendResp { crops }))
}

#[derive(Deserialize, Default)]
struct CityQuery {
    #[serde(default)]
    city: Option<String>,
}

#[derive(Serialize)]
struct ForecastEntryOut {
    time: String,
    temp: f64,
    rain: f64,
    condition: String,
    alert: &'static str,
    alert_level: AlertLabel,
}

#[derive(Serialize)]
struct WeatherResp {
    city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<Location>,
    forecast: Vec<ForecastEntryOut>,
    days: Vec<DateGroup>,
}

async fn weather(
    State(state): State<AppState>,
    Query(q): Query<CityQuery>,
) -> Result<Json<WeatherResp>, AdvisorError> {
    let now = Local::now().naive_local();
    let fc = state.forecast.forecast(q.city.as_deref(), now).await?;

    let forecast = fc
        .report
        .entries
        .iter()
        .map(|e| ForecastEntryOut {
            time: e.sample.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            temp: e.sample.temperature_c,
            rain: e.sample.precipitation_mm,
            condition: e.sample.condition.clone(),
            alert: e.alert.message(),
            alert_level: e.alert,
        })
        .collect();

    Ok(Json(WeatherResp {
        city: fc.city,
        location: fc.location,
        forecast,
        days: fc.report.groups,
    }))
}

#[derive(Serialize)]
struct OutlookDayOut {
    date: String,
    max_temp: f64,
    min_temp: f64,
    rain: f64,
    weather_code: u16,
    alert: &'static str,
    alert_level: DailyAlert,
}

#[derive(Serialize)]
struct OutlookResp {
    city: String,
    latitude: f64,
    longitude: f64,
    days: Vec<OutlookDayOut>,
}

async fn outlook(State(state): State<AppState>) -> Result<Json<OutlookResp>, AdvisorError> {
    let o = state.forecast.outlook().await?;
    let days = o
        .days
        .iter()
        .map(|d| OutlookDayOut {
            date: d.date.to_string(),
            max_temp: d.max_temp_c,
            min_temp: d.min_temp_c,
            rain: d.precipitation_sum_mm,
            weather_code: d.weather_code,
            alert: d.alert.message(),
            alert_level: d.alert,
        })
        .collect();
    Ok(Json(OutlookResp {
        city: o.location.city,
        latitude: o.location.latitude,
        longitude: o.location.longitude,
        days,
    }))
}
