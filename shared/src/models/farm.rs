//! Farm detail models

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::activity::{ActivityLog, ActivityLogs};
use crate::types::lenient;

/// Land records are kept in acres and guntas (40 guntas to the acre)
pub const GUNTAS_PER_ACRE: f64 = 40.0;

/// Farm details as stored under `Users/{userId}/farmDetails`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FarmDetails {
    #[serde(deserialize_with = "lenient::text")]
    pub soil_type: String,
    #[serde(deserialize_with = "lenient::number")]
    pub acre: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub gunta: f64,
    #[serde(deserialize_with = "lenient::text")]
    pub district: String,
    #[serde(deserialize_with = "lenient::text")]
    pub taluk: String,
}

impl FarmDetails {
    /// Total holding in acres
    pub fn size_in_acres(&self) -> f64 {
        self.acre + self.gunta / GUNTAS_PER_ACRE
    }

    pub fn soil(&self) -> SoilType {
        SoilType::from(self.soil_type.as_str())
    }
}

/// Soil classes understood by the advisory models.
///
/// Matching is exact on the labels the mobile app writes; anything else is
/// `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SoilType {
    RedSoil,
    BlackSoil,
    Loam,
    Laterite,
    Sandy,
    #[default]
    Other,
}

impl SoilType {
    /// Encoding used by the existing-crop feature vector
    pub fn log_feature_code(&self) -> u8 {
        match self {
            SoilType::RedSoil => 1,
            SoilType::BlackSoil => 2,
            SoilType::Loam => 3,
            _ => 0,
        }
    }

    /// Encoding used by the new-crop site feature vector
    pub fn site_feature_code(&self) -> u8 {
        match self {
            SoilType::RedSoil => 1,
            SoilType::BlackSoil => 2,
            SoilType::Laterite => 3,
            SoilType::Sandy => 4,
            _ => 0,
        }
    }
}

impl From<&str> for SoilType {
    fn from(label: &str) -> Self {
        match label {
            "Red Soil" => SoilType::RedSoil,
            "Black Soil" => SoilType::BlackSoil,
            "Loam" => SoilType::Loam,
            "Laterite" => SoilType::Laterite,
            "Sandy" => SoilType::Sandy,
            _ => SoilType::Other,
        }
    }
}

/// Everything stored for one user under `Users/{userId}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserRecord {
    #[serde(deserialize_with = "lenient::or_default")]
    pub farm_details: FarmDetails,
    /// Activity logs per crop key
    #[serde(deserialize_with = "lenient::or_default")]
    pub farm_activity_logs: BTreeMap<String, ActivityLogs>,
}

impl UserRecord {
    /// Logs for one crop instance; unknown crop keys have no history
    pub fn crop_logs(&self, crop_key: &str) -> &[ActivityLog] {
        self.farm_activity_logs
            .get(crop_key)
            .map(|logs| logs.as_slice())
            .unwrap_or(&[])
    }
}
