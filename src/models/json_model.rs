// src/models/json_model.rs
//! Model-backed collaborators with parameters stored as JSON.
//!
//! - `GaussianNbClassifier`: per-class priors, feature means and variances.
//! - `OneHotLinearYield`: one-hot(season) ++ one-hot(crop) ++ [area] → linear regression.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::{fs, path::Path};

use crate::error::ModelError;
use crate::models::{
    normalize_label, CropClassifier, CropProbability, EncodedRow, Features, YieldModel,
    FEATURE_COUNT,
};

#[derive(Debug, Clone, Deserialize)]
pub struct GaussianNbClassifier {
    pub classes: Vec<String>,
    pub priors: Vec<f64>,
    pub means: Vec<Vec<f64>>,
    pub variances: Vec<Vec<f64>>,
}

impl GaussianNbClassifier {
    pub fn from_json_str(s: &str) -> Result<Self> {
        let model: Self = serde_json::from_str(s).context("parsing classifier json")?;
        model.validate()?;
        Ok(model)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading classifier from {}", path.display()))?;
        Self::from_json_str(&data)
    }

    fn validate(&self) -> Result<()> {
        let n = self.classes.len();
        if n == 0 {
            bail!("classifier has no classes");
        }
        if self.priors.len() != n || self.means.len() != n || self.variances.len() != n {
            bail!("classifier parameter arrays must have one row per class ({n})");
        }
        if self.priors.iter().any(|p| !p.is_finite() || *p <= 0.0) {
            bail!("classifier priors must be positive");
        }
        for (i, (m, v)) in self.means.iter().zip(&self.variances).enumerate() {
            if m.len() != FEATURE_COUNT || v.len() != FEATURE_COUNT {
                bail!(
                    "class '{}' needs {FEATURE_COUNT} means and variances",
                    self.classes[i]
                );
            }
            if v.iter().any(|x| !x.is_finite() || *x <= 0.0) {
                bail!("class '{}' has a non-positive variance", self.classes[i]);
            }
        }
        Ok(())
    }

    fn joint_log_likelihood(&self, class: usize, x: &Features) -> f64 {
        let means = &self.means[class];
        let vars = &self.variances[class];
        let mut ll = self.priors[class].ln();
        for j in 0..FEATURE_COUNT {
            let d = x[j] - means[j];
            ll += -0.5 * (2.0 * std::f64::consts::PI * vars[j]).ln() - d * d / (2.0 * vars[j]);
        }
        ll
    }
}

impl CropClassifier for GaussianNbClassifier {
    fn predict_probabilities(&self, features: &Features) -> Result<Vec<CropProbability>, ModelError> {
        if features.iter().any(|x| !x.is_finite()) {
            return Err(ModelError::Inference("non-finite feature value".into()));
        }

        let logs: Vec<f64> = (0..self.classes.len())
            .map(|c| self.joint_log_likelihood(c, features))
            .collect();
        let max = logs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let exps: Vec<f64> = logs.iter().map(|l| (l - max).exp()).collect();
        let total: f64 = exps.iter().sum();
        if !total.is_finite() || total <= 0.0 {
            return Err(ModelError::NonFinite);
        }

        Ok(self
            .classes
            .iter()
            .zip(exps)
            .map(|(c, e)| CropProbability::new(c.clone(), e / total))
            .collect())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OneHotLinearYield {
    pub seasons: Vec<String>,
    pub crops: Vec<String>,
    /// `seasons.len() + crops.len() + 1` weights; the last one multiplies the area.
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl OneHotLinearYield {
    pub fn from_json_str(s: &str) -> Result<Self> {
        let mut model: Self = serde_json::from_str(s).context("parsing yield model json")?;
        let expected = model.seasons.len() + model.crops.len() + 1;
        if model.coefficients.len() != expected {
            bail!(
                "yield model needs {expected} coefficients, found {}",
                model.coefficients.len()
            );
        }
        model.seasons = model.seasons.iter().map(|s| normalize_label(s)).collect();
        model.crops = model.crops.iter().map(|s| normalize_label(s)).collect();
        Ok(model)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading yield model from {}", path.display()))?;
        Self::from_json_str(&data)
    }

    fn width(&self) -> usize {
        self.seasons.len() + self.crops.len()
    }
}

fn one_hot_index(categories: &[String], field: &'static str, value: &str) -> Result<usize, ModelError> {
    let v = normalize_label(value);
    categories
        .iter()
        .position(|c| *c == v)
        .ok_or_else(|| ModelError::UnknownCategory {
            field,
            value: value.to_string(),
        })
}

impl YieldModel for OneHotLinearYield {
    fn encode(&self, season: &str, crop: &str) -> Result<EncodedRow, ModelError> {
        let s = one_hot_index(&self.seasons, "season", season)?;
        let c = one_hot_index(&self.crops, "crop", crop)?;
        let mut row = vec![0.0; self.width()];
        row[s] = 1.0;
        row[self.seasons.len() + c] = 1.0;
        Ok(EncodedRow(row))
    }

    fn predict_yield(&self, row: &EncodedRow, area_ha: f64) -> Result<f64, ModelError> {
        if row.0.len() != self.width() {
            return Err(ModelError::ShapeMismatch {
                expected: self.width(),
                got: row.0.len(),
            });
        }
        let (one_hot_w, area_w) = self.coefficients.split_at(self.width());
        let y = self.intercept
            + one_hot_w.iter().zip(&row.0).map(|(w, x)| w * x).sum::<f64>()
            + area_w[0] * area_ha;
        if y.is_finite() {
            Ok(y)
        } else {
            Err(ModelError::NonFinite)
        }
    }
}
