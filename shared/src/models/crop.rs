//! Candidate crops and site conditions for new-crop recommendation

use serde::{Deserialize, Serialize};

use crate::types::lenient;

/// Crops eligible for a new-crop recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CandidateCrop {
    #[serde(rename = "Areca nut")]
    ArecaNut,
    Paddy,
    Banana,
    Chilli,
}

/// Candidates in evaluation order; the first entry is also the fallback
pub const CANDIDATE_CROPS: [CandidateCrop; 4] = [
    CandidateCrop::ArecaNut,
    CandidateCrop::Paddy,
    CandidateCrop::Banana,
    CandidateCrop::Chilli,
];

impl CandidateCrop {
    pub fn name(&self) -> &'static str {
        match self {
            CandidateCrop::ArecaNut => "Areca nut",
            CandidateCrop::Paddy => "Paddy",
            CandidateCrop::Banana => "Banana",
            CandidateCrop::Chilli => "Chilli",
        }
    }

    /// Feature encoding of the crop
    pub fn code(&self) -> u8 {
        match self {
            CandidateCrop::ArecaNut => 1,
            CandidateCrop::Paddy => 2,
            CandidateCrop::Banana => 3,
            CandidateCrop::Chilli => 4,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        CANDIDATE_CROPS.into_iter().find(|c| c.name() == name)
    }
}

impl std::fmt::Display for CandidateCrop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Encoding of an arbitrary crop name; names outside the candidate set are 0
pub fn crop_code(name: &str) -> u8 {
    CandidateCrop::from_name(name).map(|c| c.code()).unwrap_or(0)
}

/// Site information supplied with a new-crop request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteConditions {
    /// Overrides the stored soil type when non-empty
    #[serde(deserialize_with = "lenient::text")]
    pub soil_type: String,
    #[serde(deserialize_with = "lenient::number")]
    pub farm_size_acre: f64,
    /// Average annual rainfall in mm
    #[serde(deserialize_with = "lenient::number")]
    pub avg_rainfall: f64,
    /// Average temperature in degrees Celsius
    #[serde(deserialize_with = "lenient::number")]
    pub avg_temp: f64,
}
