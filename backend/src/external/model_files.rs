//! Loading trained model files
//!
//! A missing or unreadable model is never fatal: the advisor falls back to the
//! heuristic scorer for that path and logs why.

use std::path::Path;
use std::sync::Arc;

use shared::{
    CropAdvisor, CropScorer, HeuristicScorer, LinearModel, LogisticModel, ModelError, ModelScorer,
    RiskScorer,
};

use crate::config::ModelsConfig;

/// Read and parse a model file, treating any failure as "no model"
fn load_model<T>(path: &Path, parse: fn(&str) -> Result<T, ModelError>) -> Option<T> {
    if !path.exists() {
        tracing::info!("No model at {}, using heuristic scoring", path.display());
        return None;
    }

    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!("Failed to read model {}: {}", path.display(), e);
            return None;
        }
    };

    match parse(&json) {
        Ok(model) => {
            tracing::info!("Loaded model from {}", path.display());
            Some(model)
        }
        Err(e) => {
            tracing::warn!("Ignoring model {}: {}", path.display(), e);
            None
        }
    }
}

pub fn load_risk_model(path: &Path) -> Option<LogisticModel> {
    load_model(path, LogisticModel::from_json)
}

pub fn load_yield_model(path: &Path) -> Option<LinearModel> {
    load_model(path, LinearModel::from_json)
}

/// Build the advisor, choosing model-backed or heuristic scoring per path
pub fn build_advisor(config: &ModelsConfig) -> CropAdvisor {
    let risk: Arc<dyn RiskScorer> = match load_risk_model(Path::new(&config.existing_crop_path)) {
        Some(model) => Arc::new(ModelScorer::new(model)),
        None => Arc::new(HeuristicScorer),
    };

    let crops: Arc<dyn CropScorer> = match load_yield_model(Path::new(&config.new_crop_path)) {
        Some(model) => Arc::new(ModelScorer::new(model)),
        None => Arc::new(HeuristicScorer),
    };

    CropAdvisor::new(risk, crops)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("crop-advisory-{}-{}", std::process::id(), name));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_missing_models_fall_back_to_heuristics() {
        let advisor = build_advisor(&ModelsConfig {
            existing_crop_path: "/nonexistent/existing.json".to_string(),
            new_crop_path: "/nonexistent/new.json".to_string(),
        });
        assert!(!advisor.recommends_with_model());
    }

    #[test]
    fn test_corrupt_model_is_ignored() {
        let path = temp_file("corrupt.json", "{\"weights\": \"heavy\"}");
        assert!(load_yield_model(&path).is_none());
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_valid_model_is_used() {
        let path = temp_file(
            "yield.json",
            r#"{"weights": [0.0, 0.0, 0.05, 0.0, 1.0], "intercept": 2.0}"#,
        );
        let advisor = build_advisor(&ModelsConfig {
            existing_crop_path: "/nonexistent/existing.json".to_string(),
            new_crop_path: path.to_string_lossy().into_owned(),
        });
        assert!(advisor.recommends_with_model());
        std::fs::remove_file(path).ok();
    }
}
