//! Advisory output models

use serde::{Deserialize, Serialize};

use crate::models::crop::CandidateCrop;
use crate::types::Translatable;

/// Progress of one crop lifecycle stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    NotStarted,
    InProgress,
    Completed,
}

/// Status of every lifecycle stage, keyed by stage name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageStatusMap {
    pub pre_planting: StageStatus,
    pub planting_cultivation: StageStatus,
    pub harvest_post_harvest: StageStatus,
}

/// Advice for a crop that is already in the ground
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdviceResult {
    pub stage_status: StageStatusMap,
    pub water_management_advice: String,
    pub nutrient_management_advice: String,
    pub pest_management_advice: String,
    #[serde(rename = "next7DaysPlan")]
    pub next_7_days_plan: Vec<String>,
    /// Probability of an adverse outcome, present only with a trained model
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<f64>,
}

impl Translatable for AdviceResult {
    fn text_fields_mut(&mut self) -> Vec<&mut String> {
        let mut fields = vec![
            &mut self.water_management_advice,
            &mut self.nutrient_management_advice,
            &mut self.pest_management_advice,
        ];
        fields.extend(self.next_7_days_plan.iter_mut());
        fields
    }
}

/// Score a candidate received during recommendation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropScore {
    pub crop: CandidateCrop,
    pub score: f64,
}

/// Recommended crop to plant next, with a management plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropRecommendation {
    pub recommended_crop: CandidateCrop,
    pub reasoning: String,
    pub expected_yield: String,
    pub seed_plant_advice: String,
    pub water_management_advice: String,
    pub nutrient_management_advice: String,
    pub pest_management_advice: String,
    pub risk_factors: Vec<String>,
    /// Every candidate's score, in evaluation order
    pub crop_scores: Vec<CropScore>,
}

impl Translatable for CropRecommendation {
    fn text_fields_mut(&mut self) -> Vec<&mut String> {
        let mut fields = vec![
            &mut self.reasoning,
            &mut self.expected_yield,
            &mut self.seed_plant_advice,
            &mut self.water_management_advice,
            &mut self.nutrient_management_advice,
            &mut self.pest_management_advice,
        ];
        fields.extend(self.risk_factors.iter_mut());
        fields
    }
}

/// Headline plus action items, used by the quick advice endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickAdvice {
    pub advisory: String,
    pub recommendations: Vec<String>,
}

impl QuickAdvice {
    pub fn new(advisory: impl Into<String>, recommendations: &[&str]) -> Self {
        Self {
            advisory: advisory.into(),
            recommendations: recommendations.iter().map(|r| r.to_string()).collect(),
        }
    }
}

impl Translatable for QuickAdvice {
    fn text_fields_mut(&mut self) -> Vec<&mut String> {
        let mut fields = vec![&mut self.advisory];
        fields.extend(self.recommendations.iter_mut());
        fields
    }
}
