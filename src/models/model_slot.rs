use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use crate::error::AppError;
use crate::models::forecast_model::{DenseForecastModel, ForecastModel};

/// Load-once holder for the forecast model.
///
/// Built explicitly in `main` and shared through an `Arc`. The first call to
/// [`get`](Self::get) (or [`preload`](Self::preload)) reads the artifact; the
/// outcome, success or failure, is kept for the life of the process.
pub struct ModelSlot {
    path: PathBuf,
    model: OnceLock<Result<Arc<dyn ForecastModel>, AppError>>,
}

impl ModelSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            model: OnceLock::new(),
        }
    }

    /// Slot that already holds `model`; nothing is read from disk.
    pub fn with_model(model: Arc<dyn ForecastModel>) -> Self {
        let slot = Self::new(PathBuf::new());
        let _ = slot.model.set(Ok(model));
        slot
    }

    pub fn get(&self) -> Result<Arc<dyn ForecastModel>, AppError> {
        self.model.get_or_init(|| self.load()).clone()
    }

    /// Loads eagerly; returns whether the model is usable.
    pub fn preload(&self) -> bool {
        match self.get() {
            Ok(_) => {
                log::info!("Forecast model ready ({})", self.path.display());
                true
            }
            Err(e) => {
                log::warn!("{}", e);
                false
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.model.get().is_some()
    }

    fn load(&self) -> Result<Arc<dyn ForecastModel>, AppError> {
        DenseForecastModel::load(&self.path)
            .map(|m| Arc::new(m) as Arc<dyn ForecastModel>)
            .map_err(|e| AppError::ModelUnavailable(format!("{:#}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::forecast_model::demo_artifact;

    #[test]
    fn missing_artifact_is_remembered_as_unavailable() {
        let slot = ModelSlot::new("no/such/model.json");
        assert!(!slot.is_loaded());
        assert!(matches!(slot.get(), Err(AppError::ModelUnavailable(_))));
        assert!(slot.is_loaded());
        assert!(!slot.preload());
    }

    #[test]
    fn preset_model_is_shared() {
        let model: Arc<dyn ForecastModel> = Arc::new(DenseForecastModel::from_artifact(demo_artifact(5, 0.5)).unwrap());
        let slot = ModelSlot::with_model(model.clone());
        let got = slot.get().unwrap();
        assert!(Arc::ptr_eq(&got, &model));
        assert_eq!(got.window_len(), 5);
    }
}
