//! Advisory service: loads farm records, runs the advisor and localizes the
//! result

use shared::{
    latest_log_advice, soil_based_suggestion, validate_language_code, ActivityLog, AdviceResult,
    CropAdvisor, CropRecommendation, LanguageCode, QuickAdvice, SiteConditions,
};

use crate::error::{AppError, AppResult};
use crate::external::TranslateClient;
use crate::services::records::FarmRecordService;
use crate::AppState;

/// Advisory service
#[derive(Clone)]
pub struct AdvisoryService {
    advisor: CropAdvisor,
    records: FarmRecordService,
    translator: TranslateClient,
}

impl AdvisoryService {
    /// Create a new AdvisoryService from shared application state
    pub fn new(state: &AppState) -> Self {
        Self {
            advisor: state.advisor.clone(),
            records: FarmRecordService::new(state.store.clone(), &state.config.firebase.users_root),
            translator: state.translator.clone(),
        }
    }

    /// Advice for one of a user's crops, based on its stored log history
    pub async fn existing_crop_advice(
        &self,
        user_id: &str,
        crop_key: &str,
        language: Option<&str>,
    ) -> AppResult<AdviceResult> {
        let language = parse_language(language)?;
        shared::validate_store_key(crop_key)
            .map_err(|msg| AppError::validation("crop_key", msg))?;

        let record = self
            .records
            .get_user_record(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User".to_string()))?;

        let logs = record.crop_logs(crop_key);
        let mut advice = self.advisor.existing_crop_advice(&record.farm_details, logs);

        tracing::debug!(
            "Existing-crop advice for user {} crop {}: {} logs, risk {:?}",
            user_id,
            crop_key,
            logs.len(),
            advice.risk_score
        );

        self.translator.localize(&mut advice, &language).await?;
        Ok(advice)
    }

    /// Best crop to plant next on a user's farm
    pub async fn new_crop_recommendation(
        &self,
        user_id: &str,
        site: &SiteConditions,
        language: Option<&str>,
    ) -> AppResult<CropRecommendation> {
        let language = parse_language(language)?;

        let record = self
            .records
            .get_user_record(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User".to_string()))?;

        let mut recommendation = self.advisor.new_crop_recommend(&record.farm_details, site);

        tracing::debug!(
            "Recommended {} for user {} (model: {})",
            recommendation.recommended_crop,
            user_id,
            self.advisor.recommends_with_model()
        );

        self.translator.localize(&mut recommendation, &language).await?;
        Ok(recommendation)
    }

    /// Advice from client-supplied logs, without touching the store
    pub async fn quick_existing_advice(
        &self,
        logs: &[ActivityLog],
        language: Option<&str>,
    ) -> AppResult<QuickAdvice> {
        let language = parse_language(language)?;
        let mut advice = latest_log_advice(logs);
        self.translator.localize(&mut advice, &language).await?;
        Ok(advice)
    }

    /// Planting suggestion from a soil label, without touching the store
    pub async fn quick_new_advice(
        &self,
        soil_type: &str,
        language: Option<&str>,
    ) -> AppResult<QuickAdvice> {
        let language = parse_language(language)?;
        let mut advice = soil_based_suggestion(soil_type);
        self.translator.localize(&mut advice, &language).await?;
        Ok(advice)
    }
}

/// Missing language means the default; anything else must look like a code
fn parse_language(language: Option<&str>) -> AppResult<LanguageCode> {
    match language.map(str::trim).filter(|l| !l.is_empty()) {
        None => Ok(LanguageCode::default()),
        Some(code) => {
            validate_language_code(code).map_err(|msg| AppError::validation("language", msg))?;
            Ok(LanguageCode::new(code))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_language() {
        assert!(parse_language(None).unwrap().is_default());
        assert!(parse_language(Some("  ")).unwrap().is_default());
        assert_eq!(parse_language(Some("kn")).unwrap().as_str(), "kn");
        assert!(matches!(
            parse_language(Some("kannada")),
            Err(AppError::Validation { .. })
        ));
    }
}
