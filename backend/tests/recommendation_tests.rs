//! Tests for new-crop recommendation and feature encoding
//! Verifies candidate selection, determinism and soil encoding

use proptest::prelude::*;
use shared::{
    crop_code, heuristic_crop_score, latest_log_advice, select_best, site_features,
    soil_based_suggestion, ActivityLog, CandidateCrop, CropAdvisor, CropScore, FarmDetails,
    LinearModel, LogisticModel, ModelScorer, SiteConditions, SoilType, CANDIDATE_CROPS,
};
use std::sync::Arc;

fn site(rainfall: f64) -> SiteConditions {
    SiteConditions {
        soil_type: "Red Soil".to_string(),
        farm_size_acre: 2.0,
        avg_rainfall: rainfall,
        avg_temp: 27.0,
    }
}

fn score_of(scores: &[CropScore], crop: CandidateCrop) -> f64 {
    scores
        .iter()
        .find(|s| s.crop == crop)
        .map(|s| s.score)
        .unwrap()
}

// =============================================================================
// Heuristic scoring
// =============================================================================

mod heuristic_scoring {
    use super::*;

    #[test]
    fn rainfall_800_scores() {
        let recommendation =
            CropAdvisor::heuristic().new_crop_recommend(&FarmDetails::default(), &site(800.0));
        let scores = &recommendation.crop_scores;

        assert_eq!(score_of(scores, CandidateCrop::ArecaNut), 80.0);
        assert!((score_of(scores, CandidateCrop::Paddy) - 66.666).abs() < 0.01);
        assert!((score_of(scores, CandidateCrop::Banana) - 53.333).abs() < 0.01);
        // Chilli peaks at 800 mm but the rainfall-proportional crops still outscore it
        assert_eq!(score_of(scores, CandidateCrop::Chilli), 50.0);
        assert_eq!(recommendation.recommended_crop, CandidateCrop::ArecaNut);
    }

    #[test]
    fn dry_site_ties_go_to_first_candidate() {
        // At 0 mm every proportional score is 0 and Chilli is -30
        let recommendation =
            CropAdvisor::heuristic().new_crop_recommend(&FarmDetails::default(), &site(0.0));
        assert_eq!(recommendation.recommended_crop, CandidateCrop::ArecaNut);
        assert_eq!(heuristic_crop_score(CandidateCrop::Chilli, 0.0), -30.0);
    }

    #[test]
    fn scores_listed_in_candidate_order() {
        let recommendation =
            CropAdvisor::heuristic().new_crop_recommend(&FarmDetails::default(), &site(1200.0));
        let order: Vec<CandidateCrop> = recommendation.crop_scores.iter().map(|s| s.crop).collect();
        assert_eq!(order, CANDIDATE_CROPS.to_vec());
    }

    #[test]
    fn advice_text_names_the_crop() {
        let recommendation =
            CropAdvisor::heuristic().new_crop_recommend(&FarmDetails::default(), &site(1500.0));
        assert!(recommendation.reasoning.contains("Areca nut"));
        assert!(recommendation.seed_plant_advice.contains("Areca nut"));
        assert_eq!(recommendation.risk_factors.len(), 2);
        assert!(recommendation.expected_yield.starts_with("Expected yield"));
    }

    #[test]
    fn first_of_equal_scores_wins() {
        let scores = vec![
            CropScore { crop: CandidateCrop::Paddy, score: 10.0 },
            CropScore { crop: CandidateCrop::Banana, score: 10.0 },
        ];
        assert_eq!(select_best(&scores).crop, CandidateCrop::Paddy);
    }
}

// =============================================================================
// Model-backed scoring
// =============================================================================

mod model_scoring {
    use super::*;

    #[test]
    fn crop_code_feature_decides_the_winner() {
        // Score = crop_code, so the last candidate wins
        let model = LinearModel::new([0.0, 0.0, 0.0, 0.0, 1.0], 0.0);
        let advisor = CropAdvisor::new(
            Arc::new(ModelScorer::new(LogisticModel::new([0.0; 5], 0.0))),
            Arc::new(ModelScorer::new(model)),
        );
        let recommendation = advisor.new_crop_recommend(&FarmDetails::default(), &site(800.0));

        assert_eq!(recommendation.recommended_crop, CandidateCrop::Chilli);
        assert_eq!(
            recommendation.expected_yield,
            "Model-based expected yield: 4.0 units/acre"
        );
    }

    #[test]
    fn nan_model_output_falls_back_to_first_candidate() {
        let model = LinearModel::new([f64::NAN, 0.0, 0.0, 0.0, 0.0], 0.0);
        let advisor = CropAdvisor::new(
            Arc::new(shared::HeuristicScorer),
            Arc::new(ModelScorer::new(model)),
        );
        let recommendation = advisor.new_crop_recommend(&FarmDetails::default(), &site(800.0));
        assert_eq!(recommendation.recommended_crop, CANDIDATE_CROPS[0]);
    }
}

// =============================================================================
// Encoding
// =============================================================================

mod encoding {
    use super::*;

    #[test]
    fn known_soils_encode() {
        assert_eq!(SoilType::from("Red Soil").log_feature_code(), 1);
        assert_eq!(SoilType::from("Black Soil").log_feature_code(), 2);
        assert_eq!(SoilType::from("Loam").log_feature_code(), 3);
        assert_eq!(SoilType::from("Laterite").site_feature_code(), 3);
        assert_eq!(SoilType::from("Sandy").site_feature_code(), 4);
    }

    #[test]
    fn site_soil_overrides_farm_soil() {
        let farm = FarmDetails {
            soil_type: "Black Soil".to_string(),
            ..Default::default()
        };
        let features = site_features(&farm, &site(800.0), CandidateCrop::Banana);
        assert_eq!(features.soil_code, 1);
        assert_eq!(features.crop_code, 3);

        let blank = SiteConditions::default();
        assert_eq!(site_features(&farm, &blank, CandidateCrop::Banana).soil_code, 2);
    }

    #[test]
    fn crop_names_encode() {
        assert_eq!(crop_code("Areca nut"), 1);
        assert_eq!(crop_code("Chilli"), 4);
        assert_eq!(crop_code("Mango"), 0);
    }
}

// =============================================================================
// Quick advice
// =============================================================================

mod quick_advice {
    use super::*;

    #[test]
    fn latest_log_decides_advice() {
        let logs: Vec<ActivityLog> = serde_json::from_value(serde_json::json!([
            {"stage": "planting_cultivation", "subActivity": "crop_protection_maintenance"},
            {"stage": "planting_cultivation", "subActivity": "water_management"}
        ]))
        .unwrap();
        let advice = latest_log_advice(&logs);
        assert!(advice.advisory.to_lowercase().contains("water"));
    }

    #[test]
    fn soil_suggestion_has_five_steps() {
        let advice = soil_based_suggestion("Sandy loam");
        assert!(advice.advisory.contains("Groundnut"));
        assert_eq!(advice.recommendations.len(), 5);
    }
}

// =============================================================================
// Property tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The recommendation is always one of the fixed candidates
    #[test]
    fn prop_recommendation_is_candidate(
        rainfall in -5000.0f64..20000.0,
        temp in -10.0f64..50.0,
        size in 0.0f64..100.0,
        soil in "\\PC{0,20}"
    ) {
        let conditions = SiteConditions {
            soil_type: soil,
            farm_size_acre: size,
            avg_rainfall: rainfall,
            avg_temp: temp,
        };
        let recommendation =
            CropAdvisor::heuristic().new_crop_recommend(&FarmDetails::default(), &conditions);

        prop_assert!(CANDIDATE_CROPS.contains(&recommendation.recommended_crop));
        prop_assert_eq!(recommendation.crop_scores.len(), CANDIDATE_CROPS.len());
    }

    /// Same inputs without a model give identical output
    #[test]
    fn prop_recommendation_is_deterministic(rainfall in 0.0f64..5000.0) {
        let advisor = CropAdvisor::heuristic();
        let farm = FarmDetails::default();
        let first = advisor.new_crop_recommend(&farm, &site(rainfall));
        let second = advisor.new_crop_recommend(&farm, &site(rainfall));
        prop_assert_eq!(first, second);
    }

    /// Unrecognized soil labels encode to 0
    #[test]
    fn prop_unknown_soil_encodes_to_zero(label in "[a-z ]{0,24}") {
        let known = ["Red Soil", "Black Soil", "Loam", "Laterite", "Sandy"];
        prop_assume!(!known.contains(&label.as_str()));

        let soil = SoilType::from(label.as_str());
        prop_assert_eq!(soil.log_feature_code(), 0);
        prop_assert_eq!(soil.site_feature_code(), 0);
    }
}
