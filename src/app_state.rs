use crate::encode::{EncodeError, RawRecord, encode};
use crate::io_struct::PredictionOutcome;
use crate::model::{Classifier, ModelError, RandomForest};
use crate::schema;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub model_path: String,
}

#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error("{0}")]
    Encode(#[from] EncodeError),
    #[error("{0}")]
    Model(#[from] ModelError),
}

/// Shared per-process state: the loaded classifier, read-only for the
/// process lifetime, so handlers can share it without locking.
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<dyn Classifier>,
    pub model_path: String,
}

impl AppState {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let forest = RandomForest::load(Path::new(&config.model_path))?;
        Self::with_classifier(Arc::new(forest), config.model_path.clone())
    }

    /// Build state around any classifier; lets tests substitute a fake
    /// without touching global state. The schema/model width mismatch is a
    /// configuration defect and fails here, before serving begins.
    pub fn with_classifier(model: Arc<dyn Classifier>, model_path: String) -> anyhow::Result<Self> {
        let expected = schema::feature_len();
        if model.n_features() != expected {
            anyhow::bail!(
                "classifier expects {} features but the booking schema encodes {}",
                model.n_features(),
                expected
            );
        }
        Ok(AppState { model, model_path })
    }

    /// The whole request pipeline: encode the raw record, run the
    /// classifier, pick the argmax label with its probability as the
    /// confidence. Ties resolve to label 0.
    pub fn predict_outcome(&self, record: &RawRecord) -> Result<PredictionOutcome, PredictError> {
        let features = encode(record)?;
        let proba = self.model.predict_proba(&features)?;
        let label = if proba[1] > proba[0] { 1 } else { 0 };
        Ok(PredictionOutcome {
            label,
            confidence: Some(proba[label as usize]),
        })
    }
}
