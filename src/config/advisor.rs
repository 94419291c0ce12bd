// src/config/advisor.rs
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const ENV_CONFIG_PATH: &str = "ADVISOR_CONFIG_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "config/advisor.toml";

fn default_season() -> String {
    "Rabi".to_string()
}
fn default_area_ha() -> f64 {
    1000.0
}
fn default_fallback_yield() -> f64 {
    25.3
}
fn default_days() -> u8 {
    3
}
fn default_weather_api_url() -> String {
    "https://api.weatherapi.com/v1/forecast.json".to_string()
}
fn default_api_key_env() -> String {
    "WEATHER_API_KEY".to_string()
}
fn default_geolocation_url() -> String {
    "https://ipinfo.io/json".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_outlook_url() -> String {
    "https://api.open-meteo.com/v1/forecast".to_string()
}
fn default_classifier_path() -> PathBuf {
    PathBuf::from("models/crop_classifier.json")
}
fn default_yield_path() -> PathBuf {
    PathBuf::from("models/yield_regressor.json")
}

/// Fixed context for yield estimation. Not request parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct YieldDefaults {
    /// Season fed to the encoder together with the crop label.
    #[serde(default = "default_season")]
    pub season: String,
    /// Cultivated area the regressor predicts a total for (hectares).
    #[serde(default = "default_area_ha")]
    pub area_ha: f64,
    /// Used for both total and per-hectare yield when estimation fails.
    #[serde(default = "default_fallback_yield")]
    pub fallback_yield: f64,
}

impl Default for YieldDefaults {
    fn default() -> Self {
        Self {
            season: default_season(),
            area_ha: default_area_ha(),
            fallback_yield: default_fallback_yield(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForecastConfig {
    #[serde(default = "default_days")]
    pub days: u8,
    #[serde(default = "default_weather_api_url")]
    pub weather_api_url: String,
    /// Name of the env var holding the weather API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_geolocation_url")]
    pub geolocation_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            days: default_days(),
            weather_api_url: default_weather_api_url(),
            api_key_env: default_api_key_env(),
            geolocation_url: default_geolocation_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OutlookConfig {
    #[serde(default = "default_outlook_url")]
    pub url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for OutlookConfig {
    fn default() -> Self {
        Self {
            url: default_outlook_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelPaths {
    #[serde(default = "default_classifier_path")]
    pub classifier_path: PathBuf,
    #[serde(default = "default_yield_path")]
    pub yield_path: PathBuf,
}

impl Default for ModelPaths {
    fn default() -> Self {
        Self {
            classifier_path: default_classifier_path(),
            yield_path: default_yield_path(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AdvisorConfig {
    #[serde(default)]
    pub yield_defaults: YieldDefaults,
    #[serde(default)]
    pub forecast: ForecastConfig,
    #[serde(default)]
    pub outlook: OutlookConfig,
    #[serde(default)]
    pub models: ModelPaths,
}

impl AdvisorConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: AdvisorConfig = toml::from_str(s).context("parsing advisor config")?;
        Ok(cfg.sanitized())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading advisor config from {}", path.display()))?;
        Self::from_toml_str(&data)
    }

    /// Resolution order:
    /// 1) $ADVISOR_CONFIG_PATH (must exist)
    /// 2) config/advisor.toml
    /// 3) built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
            return Self::load_from_file(&pb);
        }
        let default_p = PathBuf::from(DEFAULT_CONFIG_PATH);
        if default_p.exists() {
            return Self::load_from_file(&default_p);
        }
        Ok(Self::default())
    }

    /// Replace values the engine cannot work with by their defaults.
    fn sanitized(mut self) -> Self {
        let y = &mut self.yield_defaults;
        if !y.area_ha.is_finite() || y.area_ha <= 0.0 {
            y.area_ha = default_area_ha();
        }
        if !y.fallback_yield.is_finite() {
            y.fallback_yield = default_fallback_yield();
        }
        if y.season.trim().is_empty() {
            y.season = default_season();
        }
        self.forecast.days = self.forecast.days.clamp(1, 14);
        self
    }
}
