// src/recommend/yield_estimator.rs
use metrics::counter;
use std::sync::Arc;

use crate::config::YieldDefaults;
use crate::error::ModelError;
use crate::models::{normalize_label, YieldModel};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YieldEstimate {
    /// Tons for `YieldDefaults::area_ha`.
    pub total: f64,
    pub per_hectare: f64,
    /// True when the model failed and the configured default was used.
    pub fallback: bool,
}

/// Runs `(default season, crop)` through the yield model. Never fails: any model error
/// degrades to `fallback_yield` for both total and per-hectare values.
pub struct YieldEstimator {
    model: Arc<dyn YieldModel>,
    defaults: YieldDefaults,
}

impl YieldEstimator {
    pub fn new(model: Arc<dyn YieldModel>, defaults: YieldDefaults) -> Self {
        Self { model, defaults }
    }

    pub fn defaults(&self) -> &YieldDefaults {
        &self.defaults
    }

    pub fn estimate(&self, crop: &str) -> YieldEstimate {
        match self.try_estimate(crop) {
            Ok(est) => est,
            Err(e) => {
                tracing::warn!(target: "yield", crop, error = %e, "yield estimation failed, using default");
                counter!("recommend_yield_fallback_total").increment(1);
                self.fallback()
            }
        }
    }

    fn try_estimate(&self, crop: &str) -> Result<YieldEstimate, ModelError> {
        let row = self
            .model
            .encode(&self.defaults.season, &normalize_label(crop))?;
        let total = self.model.predict_yield(&row, self.defaults.area_ha)?;
        let per_hectare = total / self.defaults.area_ha;
        if !total.is_finite() || !per_hectare.is_finite() {
            return Err(ModelError::NonFinite);
        }
        Ok(YieldEstimate {
            total,
            per_hectare,
            fallback: false,
        })
    }

    fn fallback(&self) -> YieldEstimate {
        YieldEstimate {
            total: self.defaults.fallback_yield,
            per_hectare: self.defaults.fallback_yield,
            fallback: true,
        }
    }
}
