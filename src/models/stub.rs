// src/models/stub.rs
//! Deterministic collaborators for tests and offline demos.

use std::collections::HashSet;

use crate::error::ModelError;
use crate::models::{
    normalize_label, CropClassifier, CropProbability, EncodedRow, Features, YieldModel,
};

/// Returns the same probabilities for every input.
#[derive(Debug, Clone)]
pub struct StubClassifier {
    output: Result<Vec<CropProbability>, ModelError>,
}

impl StubClassifier {
    pub fn new(probabilities: &[(&str, f64)]) -> Self {
        Self {
            output: Ok(probabilities
                .iter()
                .map(|(c, p)| CropProbability::new(*c, *p))
                .collect()),
        }
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            output: Err(ModelError::Inference(reason.into())),
        }
    }
}

impl CropClassifier for StubClassifier {
    fn predict_probabilities(&self, _features: &Features) -> Result<Vec<CropProbability>, ModelError> {
        self.output.clone()
    }
}

/// Fixed total yield per crop. Crops without a total are unknown to the encoder;
/// crops registered with `failing_on` encode fine but fail in the regressor.
#[derive(Debug, Clone, Default)]
pub struct StubYieldModel {
    totals: Vec<(String, f64)>,
    failing: HashSet<String>,
}

impl StubYieldModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_total(mut self, crop: &str, tons: f64) -> Self {
        self.totals.push((normalize_label(crop), tons));
        self
    }

    pub fn failing_on(mut self, crop: &str) -> Self {
        let c = normalize_label(crop);
        if !self.totals.iter().any(|(k, _)| *k == c) {
            self.totals.push((c.clone(), 0.0));
        }
        self.failing.insert(c);
        self
    }
}

impl YieldModel for StubYieldModel {
    fn encode(&self, _season: &str, crop: &str) -> Result<EncodedRow, ModelError> {
        let c = normalize_label(crop);
        let idx = self
            .totals
            .iter()
            .position(|(k, _)| *k == c)
            .ok_or_else(|| ModelError::UnknownCategory {
                field: "crop",
                value: crop.to_string(),
            })?;
        let mut row = vec![0.0; self.totals.len()];
        row[idx] = 1.0;
        Ok(EncodedRow(row))
    }

    fn predict_yield(&self, row: &EncodedRow, _area_ha: f64) -> Result<f64, ModelError> {
        if row.0.len() != self.totals.len() {
            return Err(ModelError::ShapeMismatch {
                expected: self.totals.len(),
                got: row.0.len(),
            });
        }
        let idx = row
            .0
            .iter()
            .position(|x| *x == 1.0)
            .ok_or_else(|| ModelError::Inference("empty one-hot row".into()))?;
        let (crop, tons) = &self.totals[idx];
        if self.failing.contains(crop) {
            return Err(ModelError::Inference(format!("forced failure for '{crop}'")));
        }
        Ok(*tons)
    }
}
