//! Feature extraction from farm records
//!
//! Both vectors are fixed-order, five-wide numeric tuples so they can be fed
//! straight into a trained model.

use serde::Serialize;

use crate::models::{
    ActivityLog, CandidateCrop, FarmDetails, SiteConditions, SoilType, Stage, SubActivity,
};

/// Width of every feature vector handed to a model
pub const FEATURE_COUNT: usize = 5;

/// Features describing an existing crop's management history
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector {
    pub farm_size_acres: f64,
    pub soil_code: u8,
    pub irrigation_count: u32,
    pub fertilizer_applications: u32,
    pub pest_events: u32,
}

impl FeatureVector {
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.farm_size_acres,
            f64::from(self.soil_code),
            f64::from(self.irrigation_count),
            f64::from(self.fertilizer_applications),
            f64::from(self.pest_events),
        ]
    }
}

/// Features describing one candidate crop on one site
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SiteFeatureVector {
    pub farm_size_acres: f64,
    pub soil_code: u8,
    pub avg_rainfall: f64,
    pub avg_temp: f64,
    pub crop_code: u8,
}

impl SiteFeatureVector {
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.farm_size_acres,
            f64::from(self.soil_code),
            self.avg_rainfall,
            self.avg_temp,
            f64::from(self.crop_code),
        ]
    }
}

/// Summarize farm details and a crop's log history
pub fn extract_features(farm: &FarmDetails, logs: &[ActivityLog]) -> FeatureVector {
    let mut irrigation_count = 0u32;
    let mut fertilizer_applications = 0u32;
    let mut pest_events = 0u32;

    for log in logs {
        if log.is(Stage::PlantingCultivation, SubActivity::WaterManagement) {
            irrigation_count += 1;
        }
        if log.is(Stage::PlantingCultivation, SubActivity::NutrientManagement) {
            fertilizer_applications += log.applications.len() as u32;
        }
        if log.activity_kind() == SubActivity::CropProtectionMaintenance && log.has_pest_report() {
            pest_events += 1;
        }
    }

    FeatureVector {
        farm_size_acres: farm.size_in_acres(),
        soil_code: farm.soil().log_feature_code(),
        irrigation_count,
        fertilizer_applications,
        pest_events,
    }
}

/// Build the model input for one candidate crop
pub fn site_features(
    farm: &FarmDetails,
    site: &SiteConditions,
    crop: CandidateCrop,
) -> SiteFeatureVector {
    let soil_label = if site.soil_type.is_empty() {
        farm.soil_type.as_str()
    } else {
        site.soil_type.as_str()
    };

    SiteFeatureVector {
        farm_size_acres: site.farm_size_acre,
        soil_code: SoilType::from(soil_label).site_feature_code(),
        avg_rainfall: site.avg_rainfall,
        avg_temp: site.avg_temp,
        crop_code: crop.code(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn log(value: serde_json::Value) -> ActivityLog {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_counts_only_matching_logs() {
        let farm = FarmDetails {
            soil_type: "Black Soil".to_string(),
            acre: 1.0,
            gunta: 10.0,
            ..Default::default()
        };
        let logs = vec![
            log(json!({"stage": "planting_cultivation", "subActivity": "water_management"})),
            log(json!({"stage": "pre_planting", "subActivity": "water_management"})),
            log(json!({
                "stage": "planting_cultivation",
                "subActivity": "nutrient_management",
                "applications": [{"name": "Urea"}, {"name": "Potash"}]
            })),
            log(json!({
                "stage": "pre_planting",
                "subActivity": "nutrient_management",
                "applications": [{"name": "FYM"}]
            })),
            log(json!({
                "stage": "planting_cultivation",
                "subActivity": "crop_protection_maintenance",
                "pestDiseaseName": "Koleroga"
            })),
            log(json!({
                "stage": "planting_cultivation",
                "subActivity": "crop_protection_maintenance"
            })),
        ];

        let features = extract_features(&farm, &logs);
        assert_eq!(features.farm_size_acres, 1.25);
        assert_eq!(features.soil_code, 2);
        assert_eq!(features.irrigation_count, 1);
        assert_eq!(features.fertilizer_applications, 2);
        assert_eq!(features.pest_events, 1);
        assert_eq!(features.to_array(), [1.25, 2.0, 1.0, 2.0, 1.0]);
    }

    #[test]
    fn test_site_soil_prefers_request_value() {
        let farm = FarmDetails {
            soil_type: "Red Soil".to_string(),
            ..Default::default()
        };
        let mut site = SiteConditions {
            soil_type: "Sandy".to_string(),
            avg_rainfall: 1200.0,
            ..Default::default()
        };

        let features = site_features(&farm, &site, CandidateCrop::Banana);
        assert_eq!(features.soil_code, 4);
        assert_eq!(features.crop_code, 3);

        site.soil_type.clear();
        let features = site_features(&farm, &site, CandidateCrop::Banana);
        assert_eq!(features.soil_code, 1);
        assert_eq!(features.to_array(), [0.0, 1.0, 1200.0, 0.0, 3.0]);

        // Only an empty label falls back; whitespace is an unknown soil
        site.soil_type = "  ".to_string();
        assert_eq!(site_features(&farm, &site, CandidateCrop::Banana).soil_code, 0);
    }

    #[test]
    fn test_whitespace_pest_name_counts_as_event() {
        let logs = vec![log(json!({
            "stage": "planting_cultivation",
            "subActivity": "crop_protection_maintenance",
            "pestDiseaseName": "   "
        }))];
        assert_eq!(extract_features(&FarmDetails::default(), &logs).pest_events, 1);
    }
}
