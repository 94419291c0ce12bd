// src/recommend/ranker.rs
use std::collections::HashSet;

use crate::error::{AdvisorError, AdvisorResult, ModelError};
use crate::models::CropProbability;
use crate::recommend::RankStatus;

/// Number of crops returned per recommendation.
pub const TOP_N: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct RankedCrop {
    pub crop: String,
    pub probability: f64,
    pub status: RankStatus,
}

/// Top 3 crops by descending probability, tagged best/good/fair.
///
/// Ties keep the classifier's label order. Duplicate labels keep their first occurrence.
pub fn rank(probabilities: Vec<CropProbability>) -> AdvisorResult<Vec<RankedCrop>> {
    if let Some(bad) = probabilities.iter().find(|p| !p.probability.is_finite()) {
        tracing::warn!(crop = %bad.crop, "classifier returned a non-finite probability");
        return Err(AdvisorError::ModelInferenceFailure(ModelError::NonFinite));
    }

    let mut seen = HashSet::new();
    let mut candidates: Vec<CropProbability> = probabilities
        .into_iter()
        .filter(|p| seen.insert(p.crop.clone()))
        .collect();

    if candidates.len() < TOP_N {
        return Err(AdvisorError::InsufficientCandidates {
            available: candidates.len(),
        });
    }

    // `sort_by` is stable, which is what breaks ties by label order.
    candidates.sort_by(|a, b| b.probability.total_cmp(&a.probability));

    Ok(candidates
        .into_iter()
        .zip(RankStatus::BY_POSITION)
        .map(|(c, status)| RankedCrop {
            crop: c.crop,
            probability: c.probability,
            status,
        })
        .collect())
}
