//! Keyword-driven advice for clients that send raw logs or a soil label
//! instead of stored records

use crate::models::{ActivityLog, QuickAdvice};

/// Advice keyed off the most recent log's sub-activity
pub fn latest_log_advice(logs: &[ActivityLog]) -> QuickAdvice {
    let Some(last) = logs.last() else {
        return QuickAdvice::new(
            "No log data found for this crop.",
            &["Please record activities such as watering, fertilization, pest symptoms etc."],
        );
    };

    let sub = last.sub_activity.to_lowercase();

    if sub.contains("water") {
        QuickAdvice::new(
            "Continue regulated irrigation schedule.",
            &[
                "Maintain soil moisture but avoid waterlogging.",
                "Apply irrigation during early morning to reduce evaporation.",
            ],
        )
    } else if sub.contains("nutrient") {
        QuickAdvice::new(
            "Continue nutrient management based on crop uptake.",
            &[
                "Apply fertilizers based on soil test.",
                "Avoid excess nitrogen to prevent weak growth.",
            ],
        )
    } else if sub.contains("pest") || sub.contains("disease") {
        QuickAdvice::new(
            "Attention required \u{2014} pest/disease symptoms noticed.",
            &[
                "Apply recommended bio-pesticides immediately.",
                "Remove affected leaves and maintain field hygiene.",
            ],
        )
    } else {
        QuickAdvice::new(
            "Crop is in good condition.",
            &[
                "Maintain field sanitation.",
                "Periodic irrigation and monitoring recommended.",
            ],
        )
    }
}

/// Crop typically suited to a soil label
pub fn crop_for_soil(soil_type: &str) -> &'static str {
    let soil = soil_type.to_lowercase();
    if soil.contains("red") {
        "Arecanut"
    } else if soil.contains("black") {
        "Cotton"
    } else if soil.contains("sandy") {
        "Groundnut"
    } else {
        "Maize"
    }
}

/// Planting suggestion from the soil label alone
pub fn soil_based_suggestion(soil_type: &str) -> QuickAdvice {
    let crop = crop_for_soil(soil_type);
    QuickAdvice {
        advisory: format!("Recommended crop to plant: {crop}"),
        recommendations: vec![
            format!("Choose high-yielding variety of {crop}."),
            "Ensure soil preparation before sowing.".to_string(),
            "Use drip irrigation for water efficiency.".to_string(),
            "Apply organic manure + NPK as per requirement.".to_string(),
            "Monitor for pests from early stage.".to_string(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_with(sub_activity: &str) -> ActivityLog {
        ActivityLog {
            sub_activity: sub_activity.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_logs_ask_for_records() {
        let advice = latest_log_advice(&[]);
        assert_eq!(advice.advisory, "No log data found for this crop.");
        assert_eq!(advice.recommendations.len(), 1);
    }

    #[test]
    fn test_only_latest_log_counts() {
        let logs = vec![log_with("crop_protection_maintenance"), log_with("Water_Management")];
        assert_eq!(
            latest_log_advice(&logs).advisory,
            "Continue regulated irrigation schedule."
        );
    }

    #[test]
    fn test_keyword_branches() {
        assert!(latest_log_advice(&[log_with("nutrient_management")])
            .advisory
            .starts_with("Continue nutrient"));
        assert_eq!(
            latest_log_advice(&[log_with("Disease scouting")]).advisory,
            "Attention required \u{2014} pest/disease symptoms noticed."
        );
        assert_eq!(
            latest_log_advice(&[log_with("harvest")]).advisory,
            "Crop is in good condition."
        );
    }

    #[test]
    fn test_soil_suggestions() {
        assert_eq!(crop_for_soil("Red Soil"), "Arecanut");
        assert_eq!(crop_for_soil("BLACK cotton soil"), "Cotton");
        assert_eq!(crop_for_soil("sandy loam"), "Groundnut");
        assert_eq!(crop_for_soil(""), "Maize");

        let advice = soil_based_suggestion("Red Soil");
        assert_eq!(advice.advisory, "Recommended crop to plant: Arecanut");
        assert_eq!(advice.recommendations[0], "Choose high-yielding variety of Arecanut.");
        assert_eq!(advice.recommendations.len(), 5);
    }
}
