// src/recommend/assemble.rs
//! Same logic as the `/api/recommend` handler, without HTTP, so tests and the CLI share it.

use metrics::counter;
use serde::Deserialize;
use std::sync::Arc;

use crate::config::YieldDefaults;
use crate::error::{AdvisorError, AdvisorResult};
use crate::models::{CropClassifier, Features, YieldModel, FEATURE_NAMES};
use crate::recommend::icons::icon_for;
use crate::recommend::ranker::rank;
use crate::recommend::yield_estimator::YieldEstimator;
use crate::recommend::CropRecommendation;

/// Soil and climate measurements for one field.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SoilSample {
    #[serde(rename = "N")]
    pub nitrogen: f64,
    #[serde(rename = "P")]
    pub phosphorus: f64,
    #[serde(rename = "K")]
    pub potassium: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub ph: f64,
    pub rainfall: f64,
}

impl SoilSample {
    pub fn features(&self) -> Features {
        [
            self.nitrogen,
            self.phosphorus,
            self.potassium,
            self.temperature,
            self.humidity,
            self.ph,
            self.rainfall,
        ]
    }

    /// Shape check only: every value must be a finite number.
    pub fn validate(&self) -> AdvisorResult<()> {
        match self
            .features()
            .iter()
            .zip(FEATURE_NAMES)
            .find(|(v, _)| !v.is_finite())
        {
            Some((_, name)) => Err(AdvisorError::InvalidInput(format!(
                "{name} must be a finite number"
            ))),
            None => Ok(()),
        }
    }
}

/// Round half away from zero to 2 decimals, for presentation only.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

pub struct RecommendationEngine {
    classifier: Arc<dyn CropClassifier>,
    estimator: YieldEstimator,
}

impl RecommendationEngine {
    pub fn new(
        classifier: Arc<dyn CropClassifier>,
        yield_model: Arc<dyn YieldModel>,
        defaults: YieldDefaults,
    ) -> Self {
        Self {
            classifier,
            estimator: YieldEstimator::new(yield_model, defaults),
        }
    }

    pub fn yield_defaults(&self) -> &YieldDefaults {
        self.estimator.defaults()
    }

    /// Exactly three recommendations in descending probability order.
    ///
    /// Classifier failures abort; yield failures only swap in the default yield for that crop.
    pub fn recommend(
        &self,
        sample: &SoilSample,
        field_size_ha: Option<f64>,
    ) -> AdvisorResult<Vec<CropRecommendation>> {
        counter!("recommend_requests_total").increment(1);
        sample.validate()?;
        if let Some(f) = field_size_ha {
            if !f.is_finite() || f <= 0.0 {
                return Err(AdvisorError::InvalidInput(
                    "field_size_ha must be a positive number".into(),
                ));
            }
        }

        let probabilities = self
            .classifier
            .predict_probabilities(&sample.features())
            .map_err(AdvisorError::ModelInferenceFailure)?;
        let ranked = rank(probabilities)?;

        let out: Vec<CropRecommendation> = ranked
            .into_iter()
            .map(|c| {
                let est = self.estimator.estimate(&c.crop);
                let per_ha = round2(est.per_hectare);
                CropRecommendation {
                    icon: icon_for(&c.crop),
                    status: c.status,
                    yield_total: round2(est.total),
                    yield_per_ha: per_ha,
                    projected_production: field_size_ha.map(|f| round2(est.per_hectare * f)),
                    name: c.crop,
                }
            })
            .collect();

        tracing::info!(
            target: "recommend",
            best = %out[0].name,
            crops = ?out.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
            "recommendation ready"
        );
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{StubClassifier, StubYieldModel};
    use crate::recommend::RankStatus;

    fn sample() -> SoilSample {
        SoilSample {
            nitrogen: 90.0,
            phosphorus: 42.0,
            potassium: 43.0,
            temperature: 20.9,
            humidity: 82.0,
            ph: 6.5,
            rainfall: 202.9,
        }
    }

    #[test]
    fn rounds_yields_and_projects_production() {
        let engine = RecommendationEngine::new(
            Arc::new(StubClassifier::new(&[
                ("rice", 0.7),
                ("maize", 0.2),
                ("jute", 0.1),
            ])),
            Arc::new(StubYieldModel::new().with_total("rice", 2654.321)),
            YieldDefaults::default(),
        );
        let out = engine.recommend(&sample(), Some(2.0)).unwrap();
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].status, RankStatus::Best);
        assert_eq!(out[0].yield_total, 2654.32);
        assert_eq!(out[0].yield_per_ha, 2.65);
        assert_eq!(out[0].projected_production, Some(5.31));
        // no model entry for maize → default
        assert_eq!(out[1].yield_total, 25.3);
        assert_eq!(out[1].projected_production, Some(50.6));
    }

    #[test]
    fn non_finite_measurement_is_invalid_input() {
        let engine = RecommendationEngine::new(
            Arc::new(StubClassifier::new(&[("a", 0.4), ("b", 0.3), ("c", 0.3)])),
            Arc::new(StubYieldModel::new()),
            YieldDefaults::default(),
        );
        let mut s = sample();
        s.ph = f64::INFINITY;
        let err = engine.recommend(&s, None).unwrap_err();
        assert!(matches!(err, AdvisorError::InvalidInput(ref m) if m.starts_with("ph")));
        assert!(matches!(
            engine.recommend(&sample(), Some(0.0)),
            Err(AdvisorError::InvalidInput(_))
        ));
    }

    #[test]
    fn round2_is_half_away_from_zero() {
        assert_eq!(round2(1.005_000_1), 1.01);
        assert_eq!(round2(25.3), 25.3);
        assert_eq!(round2(-2.345_01), -2.35);
    }
}
