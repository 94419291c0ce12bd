// src/config/mod.rs
pub mod advisor;

pub use advisor::{
    AdvisorConfig, ForecastConfig, ModelPaths, OutlookConfig, YieldDefaults, DEFAULT_CONFIG_PATH,
    ENV_CONFIG_PATH,
};
