// src/models/mod.rs
//! Prediction capabilities consumed by the recommendation engine.
//!
//! The engine only sees these traits. `json_model` backs them with parameters loaded from disk;
//! `stub` backs them with fixed answers for tests and demos.

pub mod json_model;
pub mod stub;

use serde::Serialize;

use crate::error::ModelError;

pub use json_model::{GaussianNbClassifier, OneHotLinearYield};
pub use stub::{StubClassifier, StubYieldModel};

/// Classifier input order.
pub const FEATURE_NAMES: [&str; 7] = ["N", "P", "K", "temperature", "humidity", "ph", "rainfall"];
pub const FEATURE_COUNT: usize = FEATURE_NAMES.len();

pub type Features = [f64; FEATURE_COUNT];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CropProbability {
    pub crop: String,
    pub probability: f64,
}

impl CropProbability {
    pub fn new(crop: impl Into<String>, probability: f64) -> Self {
        Self {
            crop: crop.into(),
            probability,
        }
    }
}

pub trait CropClassifier: Send + Sync {
    /// One probability per known crop class, in the classifier's own label order.
    fn predict_probabilities(&self, features: &Features) -> Result<Vec<CropProbability>, ModelError>;
}

/// Encoder output for one `(season, crop)` pair, ready for the regressor.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedRow(pub Vec<f64>);

pub trait YieldModel: Send + Sync {
    fn encode(&self, season: &str, crop: &str) -> Result<EncodedRow, ModelError>;
    /// Total yield in tons for `area_ha` hectares.
    fn predict_yield(&self, row: &EncodedRow, area_ha: f64) -> Result<f64, ModelError>;
}

/// Category matching used by the encoders: trimmed, case-insensitive.
pub(crate) fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}
