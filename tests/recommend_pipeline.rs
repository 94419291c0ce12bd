// tests/recommend_pipeline.rs
// End-to-end recommendation with the shipped model files and with stubs.

mod common;

use std::path::PathBuf;
use std::sync::Arc;

use crop_advisor::config::YieldDefaults;
use crop_advisor::models::{
    CropClassifier, GaussianNbClassifier, OneHotLinearYield, StubClassifier, StubYieldModel,
};
use crop_advisor::recommend::{icon_for, RankStatus, RecommendationEngine, SoilSample};
use crop_advisor::AdvisorError;

fn model_path(file: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("models").join(file)
}

fn shipped_engine() -> RecommendationEngine {
    let classifier =
        GaussianNbClassifier::load(model_path("crop_classifier.json")).expect("classifier");
    let yield_model =
        OneHotLinearYield::load(model_path("yield_regressor.json")).expect("yield model");
    RecommendationEngine::new(
        Arc::new(classifier),
        Arc::new(yield_model),
        YieldDefaults::default(),
    )
}

fn sample(values: [f64; 7]) -> SoilSample {
    let [n, p, k, temperature, humidity, ph, rainfall] = values;
    SoilSample {
        nitrogen: n,
        phosphorus: p,
        potassium: k,
        temperature,
        humidity,
        ph,
        rainfall,
    }
}

#[test]
fn shipped_classifier_probabilities_form_a_distribution() {
    let classifier = GaussianNbClassifier::load(model_path("crop_classifier.json")).unwrap();
    let probs = classifier
        .predict_probabilities(&sample([90.0, 42.0, 43.0, 20.9, 82.0, 6.5, 202.9]).features())
        .unwrap();
    assert_eq!(probs.len(), 22);
    let total: f64 = probs.iter().map(|p| p.probability).sum();
    assert!((total - 1.0).abs() < 1e-9, "sum was {total}");
    assert!(probs.iter().all(|p| (0.0..=1.0).contains(&p.probability)));
}

#[test]
fn rice_conditions_rank_rice_first_with_model_yield() {
    let out = shipped_engine()
        .recommend(&sample([79.9, 47.6, 39.9, 23.7, 82.3, 6.4, 236.2]), None)
        .unwrap();
    assert_eq!(out.len(), 3);
    assert_eq!(out[0].name, "rice");
    assert_eq!(out[0].status, RankStatus::Best);
    assert_eq!(out[0].icon, icon_for("rice"));
    // Rabi + rice + 1000 ha → 2650 t
    assert_eq!(out[0].yield_total, 2650.0);
    assert_eq!(out[0].yield_per_ha, 2.65);
}

#[test]
fn jute_without_yield_entry_falls_back_to_default() {
    let out = shipped_engine()
        .recommend(&sample([78.4, 46.9, 40.0, 25.0, 79.6, 6.7, 174.8]), Some(2.0))
        .unwrap();
    assert_eq!(out[0].name, "jute");
    assert_eq!(out[0].yield_total, 25.3);
    assert_eq!(out[0].yield_per_ha, 25.3);
    assert_eq!(out[0].projected_production, Some(50.6));
}

#[test]
fn statuses_follow_position_even_for_equal_probabilities() {
    let engine = RecommendationEngine::new(
        Arc::new(StubClassifier::new(&[
            ("lentil", 0.25),
            ("mango", 0.25),
            ("apple", 0.25),
            ("banana", 0.25),
        ])),
        Arc::new(StubYieldModel::new()),
        YieldDefaults::default(),
    );
    let out = engine
        .recommend(&sample([1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0]), None)
        .unwrap();
    let got: Vec<(&str, RankStatus)> = out.iter().map(|c| (c.name.as_str(), c.status)).collect();
    assert_eq!(
        got,
        [
            ("lentil", RankStatus::Best),
            ("mango", RankStatus::Good),
            ("apple", RankStatus::Fair)
        ]
    );
}

#[test]
fn classifier_failure_aborts_and_small_label_set_is_rejected() {
    let s = sample([1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0]);

    let failing = RecommendationEngine::new(
        Arc::new(StubClassifier::failing("weights missing")),
        Arc::new(StubYieldModel::new()),
        YieldDefaults::default(),
    );
    assert!(matches!(
        failing.recommend(&s, None),
        Err(AdvisorError::ModelInferenceFailure(_))
    ));

    let two = RecommendationEngine::new(
        Arc::new(StubClassifier::new(&[("rice", 0.6), ("maize", 0.4), ("rice", 0.0)])),
        Arc::new(StubYieldModel::new()),
        YieldDefaults::default(),
    );
    assert!(matches!(
        two.recommend(&s, None),
        Err(AdvisorError::InsufficientCandidates { available: 2 })
    ));
}

#[test]
fn stub_engine_mixes_model_and_default_yields() {
    let out = common::stub_engine()
        .recommend(&sample([90.0, 42.0, 43.0, 20.9, 82.0, 6.5, 202.9]), None)
        .unwrap();
    let fallbacks: Vec<bool> = out.iter().map(|c| c.yield_total == 25.3).collect();
    assert_eq!(fallbacks, [false, false, true]);
}
