//! Crop scoring
//!
//! Scoring is a capability chosen once at startup: [`HeuristicScorer`] when no
//! trained model is available, [`ModelScorer`] wrapping a model otherwise.

use serde::Deserialize;
use thiserror::Error;

use crate::features::{FeatureVector, SiteFeatureVector, FEATURE_COUNT};
use crate::models::{CandidateCrop, CropScore, CANDIDATE_CROPS};

/// Errors raised while reading a model definition
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid model definition: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Model parameters must be finite")]
    NonFiniteParameter,
}

/// A trained classifier over existing-crop features
pub trait RiskModel: Send + Sync {
    /// Probability of the adverse class
    fn predict_probability(&self, features: &[f64; FEATURE_COUNT]) -> f64;
}

/// A trained regressor over site features
pub trait YieldModel: Send + Sync {
    fn predict(&self, features: &[f64; FEATURE_COUNT]) -> f64;
}

/// Risk of an adverse outcome for an existing crop
pub trait RiskScorer: Send + Sync {
    /// `None` when there is nothing to base a risk estimate on
    fn risk_score(&self, features: &FeatureVector) -> Option<f64>;

    fn is_model_backed(&self) -> bool;
}

/// Suitability score of a candidate crop for a site
pub trait CropScorer: Send + Sync {
    fn crop_score(&self, crop: CandidateCrop, features: &SiteFeatureVector) -> f64;

    fn is_model_backed(&self) -> bool;
}

/// Deterministic fallback used until a model is trained
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicScorer;

impl RiskScorer for HeuristicScorer {
    fn risk_score(&self, _features: &FeatureVector) -> Option<f64> {
        None
    }

    fn is_model_backed(&self) -> bool {
        false
    }
}

impl CropScorer for HeuristicScorer {
    fn crop_score(&self, crop: CandidateCrop, features: &SiteFeatureVector) -> f64 {
        heuristic_crop_score(crop, features.avg_rainfall)
    }

    fn is_model_backed(&self) -> bool {
        false
    }
}

/// Rainfall-only placeholder scores, kept literal until agronomists supply
/// real curves
pub fn heuristic_crop_score(crop: CandidateCrop, rainfall_mm: f64) -> f64 {
    match crop {
        CandidateCrop::ArecaNut => rainfall_mm / 10.0,
        CandidateCrop::Paddy => rainfall_mm / 12.0,
        CandidateCrop::Banana => rainfall_mm / 15.0,
        CandidateCrop::Chilli => 50.0 - (rainfall_mm - 800.0).abs() / 10.0,
    }
}

/// Scorer backed by a trained model
#[derive(Debug, Clone)]
pub struct ModelScorer<M> {
    model: M,
}

impl<M> ModelScorer<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }
}

impl<M: RiskModel> RiskScorer for ModelScorer<M> {
    fn risk_score(&self, features: &FeatureVector) -> Option<f64> {
        let probability = self.model.predict_probability(&features.to_array());
        probability.is_finite().then(|| probability.clamp(0.0, 1.0))
    }

    fn is_model_backed(&self) -> bool {
        true
    }
}

impl<M: YieldModel> CropScorer for ModelScorer<M> {
    fn crop_score(&self, _crop: CandidateCrop, features: &SiteFeatureVector) -> f64 {
        self.model.predict(&features.to_array())
    }

    fn is_model_backed(&self) -> bool {
        true
    }
}

/// Pick the best-scoring candidate.
///
/// Candidates are visited in order and only a strictly greater score replaces
/// the incumbent, so the first of several equal maxima wins. Non-finite scores
/// never win; with no finite score at all the first candidate is returned.
pub fn select_best(scores: &[CropScore]) -> CropScore {
    let mut best: Option<CropScore> = None;
    for candidate in scores.iter().filter(|s| s.score.is_finite()) {
        match best {
            Some(current) if candidate.score <= current.score => {}
            _ => best = Some(*candidate),
        }
    }

    best.unwrap_or(CropScore {
        crop: CANDIDATE_CROPS[0],
        score: scores.first().map(|s| s.score).unwrap_or(f64::NAN),
    })
}

/// Weights and intercept shared by the linear model families
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
struct LinearParameters {
    weights: [f64; FEATURE_COUNT],
    intercept: f64,
}

impl LinearParameters {
    fn from_json(json: &str) -> Result<Self, ModelError> {
        let params: LinearParameters = serde_json::from_str(json)?;
        if params.weights.iter().chain([&params.intercept]).all(|v| v.is_finite()) {
            Ok(params)
        } else {
            Err(ModelError::NonFiniteParameter)
        }
    }

    fn decision(&self, features: &[f64; FEATURE_COUNT]) -> f64 {
        self.weights
            .iter()
            .zip(features)
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept
    }
}

/// Linear regression, e.g. expected profit per acre
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearModel(LinearParameters);

impl LinearModel {
    pub fn new(weights: [f64; FEATURE_COUNT], intercept: f64) -> Self {
        Self(LinearParameters { weights, intercept })
    }

    /// Parse `{"weights": [..5 numbers..], "intercept": n}`
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        LinearParameters::from_json(json).map(Self)
    }
}

impl YieldModel for LinearModel {
    fn predict(&self, features: &[f64; FEATURE_COUNT]) -> f64 {
        self.0.decision(features)
    }
}

/// Logistic regression over existing-crop features
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogisticModel(LinearParameters);

impl LogisticModel {
    pub fn new(weights: [f64; FEATURE_COUNT], intercept: f64) -> Self {
        Self(LinearParameters { weights, intercept })
    }

    /// Parse `{"weights": [..5 numbers..], "intercept": n}`
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        LinearParameters::from_json(json).map(Self)
    }
}

impl RiskModel for LogisticModel {
    fn predict_probability(&self, features: &[f64; FEATURE_COUNT]) -> f64 {
        1.0 / (1.0 + (-self.0.decision(features)).exp())
    }
}
