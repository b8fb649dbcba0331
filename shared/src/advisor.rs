//! Advice composition for existing and new crops

use std::sync::Arc;

use crate::features::{extract_features, site_features};
use crate::models::{
    ActivityLog, AdviceResult, CropRecommendation, CropScore, FarmDetails, SiteConditions, Stage,
    StageStatus, StageStatusMap, CANDIDATE_CROPS,
};
use crate::scoring::{select_best, CropScorer, HeuristicScorer, RiskScorer};

pub const WATER_ADVICE: &str = "Maintain regular irrigation schedule based on soil moisture.";
pub const WATER_ADVICE_NO_LOGS: &str =
    "No irrigation logs found. Ensure adequate watering, especially during dry spells.";
pub const NUTRIENT_ADVICE: &str =
    "Your fertilizer applications look moderate. Follow recommended split doses.";
pub const NUTRIENT_ADVICE_NO_LOGS: &str =
    "No nutrient management logs found. Consider applying a basal dose as per recommendations.";
pub const PEST_ADVICE: &str = "Monitor the crop weekly for pests and diseases.";
pub const PEST_ADVICE_ISSUES_RECORDED: &str =
    "Pest/disease issues recorded. Continue monitoring and rotate control measures to avoid resistance.";

pub const BASELINE_NEXT_STEPS: [&str; 3] = [
    "Scout the field for pests and diseases.",
    "Check soil moisture before next irrigation.",
    "Review fertilizer schedule and plan next application.",
];
pub const HIGH_RISK_STEP: &str = "High risk of yield loss detected. Intensify monitoring and consult a local expert if symptoms appear.";
pub const STABLE_STEP: &str =
    "Crop condition seems stable. Maintain current management practices.";

/// Risk above this prepends the high-risk warning
pub const HIGH_RISK_THRESHOLD: f64 = 0.7;
/// Risk below this prepends the stability message
pub const LOW_RISK_THRESHOLD: f64 = 0.3;

pub const RISK_FACTORS: [&str; 2] = [
    "Market price fluctuations",
    "Climate variability (drought or excess rain)",
];
pub const HEURISTIC_EXPECTED_YIELD: &str =
    "Expected yield: moderate to high based on soil and rainfall.";

/// Crop advisor holding the scorers chosen at startup.
///
/// Cheap to clone; the scorers are shared and immutable.
#[derive(Clone)]
pub struct CropAdvisor {
    risk: Arc<dyn RiskScorer>,
    crops: Arc<dyn CropScorer>,
}

impl Default for CropAdvisor {
    fn default() -> Self {
        Self::heuristic()
    }
}

impl CropAdvisor {
    pub fn new(risk: Arc<dyn RiskScorer>, crops: Arc<dyn CropScorer>) -> Self {
        Self { risk, crops }
    }

    /// Advisor with no trained models
    pub fn heuristic() -> Self {
        Self::new(Arc::new(HeuristicScorer), Arc::new(HeuristicScorer))
    }

    pub fn scores_risk_with_model(&self) -> bool {
        self.risk.is_model_backed()
    }

    pub fn recommends_with_model(&self) -> bool {
        self.crops.is_model_backed()
    }

    /// Advice for a crop already being grown, from its log history
    pub fn existing_crop_advice(&self, farm: &FarmDetails, logs: &[ActivityLog]) -> AdviceResult {
        let features = extract_features(farm, logs);
        let risk_score = self.risk.risk_score(&features);

        let water_management_advice = if features.irrigation_count == 0 {
            WATER_ADVICE_NO_LOGS
        } else {
            WATER_ADVICE
        };
        let nutrient_management_advice = if features.fertilizer_applications == 0 {
            NUTRIENT_ADVICE_NO_LOGS
        } else {
            NUTRIENT_ADVICE
        };
        let pest_management_advice = if features.pest_events > 0 {
            PEST_ADVICE_ISSUES_RECORDED
        } else {
            PEST_ADVICE
        };

        AdviceResult {
            stage_status: stage_status(logs),
            water_management_advice: water_management_advice.to_string(),
            nutrient_management_advice: nutrient_management_advice.to_string(),
            pest_management_advice: pest_management_advice.to_string(),
            next_7_days_plan: next_steps(risk_score),
            risk_score,
        }
    }

    /// Recommend the best candidate crop for a site
    pub fn new_crop_recommend(
        &self,
        farm: &FarmDetails,
        site: &SiteConditions,
    ) -> CropRecommendation {
        let crop_scores: Vec<CropScore> = CANDIDATE_CROPS
            .into_iter()
            .map(|crop| CropScore {
                crop,
                score: self.crops.crop_score(crop, &site_features(farm, site, crop)),
            })
            .collect();

        let best = select_best(&crop_scores);
        let crop = best.crop.name();

        let expected_yield = if self.crops.is_model_backed() {
            format!("Model-based expected yield: {:.1} units/acre", best.score)
        } else {
            HEURISTIC_EXPECTED_YIELD.to_string()
        };

        CropRecommendation {
            recommended_crop: best.crop,
            reasoning: format!(
                "Based on your soil type, rainfall and temperature, {crop} shows the best balance of yield and profit among the candidate crops."
            ),
            expected_yield,
            seed_plant_advice: format!(
                "Select certified seedlings/seed of {crop} from an authorized nursery or dealer with good germination and disease-free status."
            ),
            water_management_advice: format!(
                "Align irrigation schedule for {crop} with local rainfall. Avoid waterlogging and long dry spells."
            ),
            nutrient_management_advice: format!(
                "Base nutrient management for {crop} on soil test values. Split N and K into 3\u{2013}4 applications across the season."
            ),
            pest_management_advice: format!(
                "Monitor {crop} weekly for major pests and diseases. Prefer biocontrol and need-based pesticide use."
            ),
            risk_factors: RISK_FACTORS.iter().map(|r| r.to_string()).collect(),
            crop_scores,
        }
    }
}

/// Lifecycle progress inferred from which stages have any log.
///
/// Pre-planting is one-off work, so a single log marks it completed; the later
/// stages stay in progress until the crop is closed out.
pub fn stage_status(logs: &[ActivityLog]) -> StageStatusMap {
    let seen = |stage: Stage| logs.iter().any(|log| log.stage_kind() == stage);
    let status = |stage: Stage, when_seen: StageStatus| {
        if seen(stage) {
            when_seen
        } else {
            StageStatus::NotStarted
        }
    };

    StageStatusMap {
        pre_planting: status(Stage::PrePlanting, StageStatus::Completed),
        planting_cultivation: status(Stage::PlantingCultivation, StageStatus::InProgress),
        harvest_post_harvest: status(Stage::HarvestPostHarvest, StageStatus::InProgress),
    }
}

/// The 7-day plan, led by a risk message when the risk is outside the
/// middle band
pub fn next_steps(risk_score: Option<f64>) -> Vec<String> {
    let lead = risk_score.and_then(|risk| {
        if risk > HIGH_RISK_THRESHOLD {
            Some(HIGH_RISK_STEP)
        } else if risk < LOW_RISK_THRESHOLD {
            Some(STABLE_STEP)
        } else {
            None
        }
    });

    lead.into_iter()
        .chain(BASELINE_NEXT_STEPS)
        .map(str::to_string)
        .collect()
}
