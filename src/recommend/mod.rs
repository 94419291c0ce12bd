// src/recommend/mod.rs
//! Crop recommendation pipeline: rank classifier output, estimate yield per candidate,
//! decorate for display.

pub mod assemble;
pub mod icons;
pub mod ranker;
pub mod yield_estimator;

use serde::{Deserialize, Serialize};

pub use assemble::{round2, RecommendationEngine, SoilSample};
pub use icons::{icon_for, DEFAULT_ICON};
pub use ranker::{rank, RankedCrop, TOP_N};
pub use yield_estimator::{YieldEstimate, YieldEstimator};

/// Qualitative label assigned by position in the ranking, not by probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankStatus {
    Best,
    Good,
    Fair,
}

impl RankStatus {
    pub const BY_POSITION: [RankStatus; 3] = [RankStatus::Best, RankStatus::Good, RankStatus::Fair];

    pub fn as_str(self) -> &'static str {
        match self {
            RankStatus::Best => "best",
            RankStatus::Good => "good",
            RankStatus::Fair => "fair",
        }
    }
}

/// One entry of the `/api/recommend` response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CropRecommendation {
    pub name: String,
    pub status: RankStatus,
    pub icon: &'static str,
    /// Tons for the configured default area, 2 decimals.
    pub yield_total: f64,
    pub yield_per_ha: f64,
    /// `yield_per_ha × field size`, only when the caller sent a field size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projected_production: Option<f64>,
}
