//! Farm activity log models

use std::ops::Deref;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::types::lenient;

/// Crop lifecycle stage a log entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    PrePlanting,
    PlantingCultivation,
    HarvestPostHarvest,
    Unknown,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::PrePlanting => "pre_planting",
            Stage::PlantingCultivation => "planting_cultivation",
            Stage::HarvestPostHarvest => "harvest_post_harvest",
            Stage::Unknown => "unknown",
        }
    }
}

impl From<&str> for Stage {
    fn from(s: &str) -> Self {
        match s {
            "pre_planting" => Stage::PrePlanting,
            "planting_cultivation" => Stage::PlantingCultivation,
            "harvest_post_harvest" => Stage::HarvestPostHarvest,
            _ => Stage::Unknown,
        }
    }
}

/// Category of work recorded within a stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubActivity {
    WaterManagement,
    NutrientManagement,
    CropProtectionMaintenance,
    Other,
}

impl From<&str> for SubActivity {
    fn from(s: &str) -> Self {
        match s {
            "water_management" => SubActivity::WaterManagement,
            "nutrient_management" => SubActivity::NutrientManagement,
            "crop_protection_maintenance" => SubActivity::CropProtectionMaintenance,
            _ => SubActivity::Other,
        }
    }
}

/// One logged farm action.
///
/// `stage` and `sub_activity` keep the raw strings written by the client so a
/// record survives a read/write cycle unchanged; use [`ActivityLog::stage_kind`]
/// and [`ActivityLog::activity_kind`] for matching.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActivityLog {
    /// Store key of the entry, filled in when read from a keyed collection
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub stage: String,
    #[serde(deserialize_with = "lenient::text")]
    pub sub_activity: String,
    #[serde(deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub applications: Vec<Value>,
    #[serde(
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub pest_disease_name: Option<String>,
}

impl ActivityLog {
    pub fn stage_kind(&self) -> Stage {
        Stage::from(self.stage.as_str())
    }

    pub fn activity_kind(&self) -> SubActivity {
        SubActivity::from(self.sub_activity.as_str())
    }

    pub fn is(&self, stage: Stage, activity: SubActivity) -> bool {
        self.stage_kind() == stage && self.activity_kind() == activity
    }

    /// True when a pest or disease name was recorded, even a blank-looking one
    pub fn has_pest_report(&self) -> bool {
        self.pest_disease_name
            .as_deref()
            .is_some_and(|name| !name.is_empty())
    }
}

/// Log history of one crop instance.
///
/// The document store hands back either an object keyed by push id or, for
/// integer-like keys, an array with holes. Push ids sort chronologically, so
/// key order is also recording order. Entries that are not objects are dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ActivityLogs(Vec<ActivityLog>);

impl ActivityLogs {
    pub fn new(logs: Vec<ActivityLog>) -> Self {
        Self(logs)
    }

    pub fn as_slice(&self) -> &[ActivityLog] {
        &self.0
    }

    /// Most recently recorded entry
    pub fn latest(&self) -> Option<&ActivityLog> {
        self.0.last()
    }

    pub fn from_value(value: Value) -> Self {
        let entries: Vec<(String, Value)> = match value {
            Value::Object(map) => map.into_iter().collect(),
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v))
                .collect(),
            _ => Vec::new(),
        };

        let logs = entries
            .into_iter()
            .filter(|(_, v)| v.is_object())
            .filter_map(|(id, v)| {
                serde_json::from_value::<ActivityLog>(v)
                    .ok()
                    .map(|log| ActivityLog { id: Some(id), ..log })
            })
            .collect();

        Self(logs)
    }
}

impl<'de> Deserialize<'de> for ActivityLogs {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(value))
    }
}

impl Deref for ActivityLogs {
    type Target = [ActivityLog];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromIterator<ActivityLog> for ActivityLogs {
    fn from_iter<I: IntoIterator<Item = ActivityLog>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_keyed_logs_keep_ids_in_key_order() {
        let logs = ActivityLogs::from_value(json!({
            "-Nb2": {"stage": "planting_cultivation", "subActivity": "water_management"},
            "-Nb1": {"stage": "pre_planting", "subActivity": "other"}
        }));
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].id.as_deref(), Some("-Nb1"));
        assert_eq!(logs.latest().unwrap().activity_kind(), SubActivity::WaterManagement);
    }

    #[test]
    fn test_array_logs_skip_holes_and_scalars() {
        let logs = ActivityLogs::from_value(json!([
            null,
            {"stage": "harvest_post_harvest"},
            "garbage",
            {"stage": "pre_planting"}
        ]));
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].id.as_deref(), Some("1"));
        assert_eq!(logs[1].stage_kind(), Stage::PrePlanting);
    }

    #[test]
    fn test_non_collection_is_empty() {
        assert!(ActivityLogs::from_value(json!("nope")).is_empty());
        assert!(ActivityLogs::from_value(Value::Null).is_empty());
    }

    #[test]
    fn test_applications_accept_keyed_objects() {
        let log: ActivityLog = serde_json::from_value(json!({
            "applications": {"a": {"name": "Urea"}, "b": {"name": "DAP"}}
        }))
        .unwrap();
        assert_eq!(log.applications.len(), 2);
    }

    #[test]
    fn test_only_empty_pest_name_is_not_a_report() {
        let log: ActivityLog = serde_json::from_value(json!({"pestDiseaseName": ""})).unwrap();
        assert!(!log.has_pest_report());

        let log: ActivityLog =
            serde_json::from_value(json!({"pestDiseaseName": "   "})).unwrap();
        assert!(log.has_pest_report());

        let log: ActivityLog =
            serde_json::from_value(json!({"pestDiseaseName": "Fruit rot"})).unwrap();
        assert!(log.has_pest_report());
    }

    #[test]
    fn test_unknown_stage_strings() {
        assert_eq!(Stage::from("Planting"), Stage::Unknown);
        assert_eq!(SubActivity::from("irrigation"), SubActivity::Other);
    }
}
