//! Farm record service for reading and writing user farm data
//!
//! Layout under the users root:
//! `{userId}/farmDetails` and `{userId}/farmActivityLogs/{cropKey}/{logId}`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use shared::{validate_store_key, ActivityLogs, FarmDetails, Stage, SubActivity, UserRecord};

use crate::error::{AppError, AppResult};
use crate::external::FirebaseClient;

const FARM_DETAILS: &str = "farmDetails";
const ACTIVITY_LOGS: &str = "farmActivityLogs";

/// Farm record service
#[derive(Clone)]
pub struct FarmRecordService {
    store: FirebaseClient,
    users_root: String,
}

/// Input for recording an activity log
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewActivityLog {
    pub stage: String,
    pub sub_activity: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub applications: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pest_disease_name: Option<String>,
    /// Any other fields the client records (dates, notes, quantities)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Input for updating farm details; only the fields present are written
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFarmDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soil_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acre: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gunta: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taluk: Option<String>,
}

impl UpdateFarmDetails {
    /// Parse a request body strictly, naming the first field of the wrong type
    pub fn from_json(body: Value) -> AppResult<Self> {
        let Value::Object(map) = body else {
            return Err(AppError::validation(
                "farmDetails",
                "Farm details must be a JSON object",
            ));
        };

        Ok(Self {
            soil_type: field(&map, "soilType", "a string")?,
            acre: field(&map, "acre", "a number")?,
            gunta: field(&map, "gunta", "a number")?,
            district: field(&map, "district", "a string")?,
            taluk: field(&map, "taluk", "a string")?,
        })
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Absent and `null` fields are left unchanged
fn field<T: DeserializeOwned>(
    map: &Map<String, Value>,
    name: &str,
    expected: &str,
) -> AppResult<Option<T>> {
    match map.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|_| AppError::validation(name, format!("{} must be {}", name, expected))),
    }
}

/// Response after recording a log
#[derive(Debug, Serialize)]
pub struct RecordedLog {
    pub id: String,
}

impl FarmRecordService {
    /// Create a new FarmRecordService instance
    pub fn new(store: FirebaseClient, users_root: impl Into<String>) -> Self {
        Self {
            store,
            users_root: users_root.into(),
        }
    }

    /// Full record of a user, or `None` if the user has no data
    pub async fn get_user_record(&self, user_id: &str) -> AppResult<Option<UserRecord>> {
        check_key("user_id", user_id)?;

        let value = self.store.get(&[self.users_root.as_str(), user_id]).await?;
        if value.is_null() {
            return Ok(None);
        }

        // A record of the wrong shape still yields defaults rather than an error
        Ok(Some(serde_json::from_value(value).unwrap_or_default()))
    }

    /// Stored farm details of a user
    pub async fn get_farm_details(&self, user_id: &str) -> AppResult<FarmDetails> {
        check_key("user_id", user_id)?;

        let value = self
            .store
            .get(&[self.users_root.as_str(), user_id, FARM_DETAILS])
            .await?;
        if value.is_null() {
            return Err(AppError::NotFound("Farm details".to_string()));
        }

        Ok(serde_json::from_value(value).unwrap_or_default())
    }

    /// Merge the given fields into the stored farm details; fields not in the
    /// update keep their stored values
    pub async fn update_farm_details(
        &self,
        user_id: &str,
        update: &UpdateFarmDetails,
    ) -> AppResult<FarmDetails> {
        check_key("user_id", user_id)?;
        validate_farm_update(update)?;

        self.store
            .update(&[self.users_root.as_str(), user_id, FARM_DETAILS], update)
            .await?;

        tracing::info!("Updated farm details for user {}", user_id);
        self.get_farm_details(user_id).await
    }

    /// Log history of one crop
    pub async fn get_crop_logs(&self, user_id: &str, crop_key: &str) -> AppResult<ActivityLogs> {
        check_key("user_id", user_id)?;
        check_key("crop_key", crop_key)?;

        let value = self
            .store
            .get(&[self.users_root.as_str(), user_id, ACTIVITY_LOGS, crop_key])
            .await?;
        Ok(ActivityLogs::from_value(value))
    }

    /// Append a log entry to a crop's history
    pub async fn record_log(
        &self,
        user_id: &str,
        crop_key: &str,
        log: NewActivityLog,
    ) -> AppResult<RecordedLog> {
        check_key("user_id", user_id)?;
        check_key("crop_key", crop_key)?;
        validate_new_log(&log)?;

        let id = self
            .store
            .push(&[self.users_root.as_str(), user_id, ACTIVITY_LOGS, crop_key], &log)
            .await?;

        tracing::info!(
            "Recorded {} log {} for user {} crop {}",
            log.sub_activity,
            id,
            user_id,
            crop_key
        );
        Ok(RecordedLog { id })
    }
}

fn check_key(field: &str, key: &str) -> AppResult<()> {
    validate_store_key(key).map_err(|msg| AppError::validation(field, msg))
}

fn validate_farm_update(update: &UpdateFarmDetails) -> AppResult<()> {
    if update.is_empty() {
        return Err(AppError::validation(
            "farmDetails",
            "At least one farm detail must be given",
        ));
    }

    for (name, size) in [("acre", update.acre), ("gunta", update.gunta)] {
        if size.is_some_and(|s| s < 0.0) {
            return Err(AppError::validation(name, "Farm size cannot be negative"));
        }
    }

    Ok(())
}

/// Stage and sub-activity must be known values; a pest report needs a name
fn validate_new_log(log: &NewActivityLog) -> AppResult<()> {
    if Stage::from(log.stage.as_str()) == Stage::Unknown {
        return Err(AppError::validation(
            "stage",
            format!(
                "Stage must be one of {}, {} or {}",
                Stage::PrePlanting.as_str(),
                Stage::PlantingCultivation.as_str(),
                Stage::HarvestPostHarvest.as_str()
            ),
        ));
    }

    let known_sub_activity = SubActivity::from(log.sub_activity.as_str()) != SubActivity::Other
        || log.sub_activity == "other";
    if !known_sub_activity {
        return Err(AppError::validation(
            "subActivity",
            "Sub-activity must be water_management, nutrient_management, crop_protection_maintenance or other",
        ));
    }

    if log
        .pest_disease_name
        .as_deref()
        .is_some_and(|name| name.trim().is_empty())
    {
        return Err(AppError::validation(
            "pestDiseaseName",
            "Pest or disease name cannot be blank",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn new_log(value: Value) -> NewActivityLog {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_valid_log_keeps_extra_fields() {
        let log = new_log(json!({
            "stage": "planting_cultivation",
            "subActivity": "nutrient_management",
            "applications": [{"fertilizer": "Urea", "quantityKg": 25}],
            "date": "2026-06-14"
        }));
        assert!(validate_new_log(&log).is_ok());

        let stored = serde_json::to_value(&log).unwrap();
        assert_eq!(stored["date"], "2026-06-14");
        assert_eq!(stored["subActivity"], "nutrient_management");
        assert!(stored.get("pestDiseaseName").is_none());
    }

    #[test]
    fn test_rejects_unknown_stage_and_sub_activity() {
        let log = new_log(json!({"stage": "flowering", "subActivity": "other"}));
        assert!(matches!(
            validate_new_log(&log),
            Err(AppError::Validation { field, .. }) if field == "stage"
        ));

        let log = new_log(json!({"stage": "pre_planting", "subActivity": "weeding"}));
        assert!(matches!(
            validate_new_log(&log),
            Err(AppError::Validation { field, .. }) if field == "subActivity"
        ));

        let log = new_log(json!({"stage": "pre_planting", "subActivity": "other"}));
        assert!(validate_new_log(&log).is_ok());
    }

    #[test]
    fn test_rejects_blank_pest_name() {
        let log = new_log(json!({
            "stage": "planting_cultivation",
            "subActivity": "crop_protection_maintenance",
            "pestDiseaseName": " "
        }));
        assert!(validate_new_log(&log).is_err());
    }

    #[test]
    fn test_farm_update_writes_only_given_fields() {
        let update = UpdateFarmDetails::from_json(json!({"acre": 3})).unwrap();
        assert!(validate_farm_update(&update).is_ok());
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({"acre": 3.0}));

        let update =
            UpdateFarmDetails::from_json(json!({"soilType": "Red Soil", "district": null}))
                .unwrap();
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"soilType": "Red Soil"})
        );
    }

    #[test]
    fn test_farm_update_rejects_wrong_types() {
        let err = UpdateFarmDetails::from_json(json!({"acre": "lots", "soilType": "Red Soil"}));
        assert!(matches!(
            err,
            Err(AppError::Validation { field, .. }) if field == "acre"
        ));

        let err = UpdateFarmDetails::from_json(json!({"district": 12}));
        assert!(matches!(
            err,
            Err(AppError::Validation { field, .. }) if field == "district"
        ));

        assert!(UpdateFarmDetails::from_json(json!([1, 2])).is_err());
    }

    #[test]
    fn test_farm_update_rejects_negative_and_empty() {
        let update = UpdateFarmDetails::from_json(json!({"gunta": -4})).unwrap();
        assert!(matches!(
            validate_farm_update(&update),
            Err(AppError::Validation { field, .. }) if field == "gunta"
        ));

        let update = UpdateFarmDetails::from_json(json!({})).unwrap();
        assert!(validate_farm_update(&update).is_err());
    }

    #[test]
    fn test_check_key_names_field() {
        assert!(matches!(
            check_key("crop_key", "a/b"),
            Err(AppError::Validation { field, .. }) if field == "crop_key"
        ));
    }
}
