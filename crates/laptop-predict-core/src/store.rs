//! Loading model artifacts from disk.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::{Model, ModelError, Predictor};

/// Reads, parses and validates one JSON model artifact.
pub fn load_model(path: impl AsRef<Path>) -> Result<Model, ModelError> {
    let path = path.as_ref();

    let content = fs::read_to_string(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let model: Model = serde_json::from_str(&content).map_err(|source| ModelError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    model.validate().map_err(|reason| ModelError::Invalid {
        path: path.to_path_buf(),
        reason,
    })?;

    info!(
        path = %path.display(),
        kind = model.kind(),
        n_features = model.n_features(),
        "Loaded model"
    );
    Ok(model)
}

/// The two models served by the API. Never reloaded.
#[derive(Clone)]
pub struct ModelStore {
    spec: Arc<dyn Predictor>,
    price: Arc<dyn Predictor>,
}

impl ModelStore {
    pub fn new(spec: Arc<dyn Predictor>, price: Arc<dyn Predictor>) -> Self {
        Self { spec, price }
    }

    /// Loads both artifacts, failing on the first one that cannot be used.
    pub fn load(
        spec_path: impl AsRef<Path>,
        price_path: impl AsRef<Path>,
    ) -> Result<Self, ModelError> {
        let spec = load_model(spec_path)?;
        let price = load_model(price_path)?;
        Ok(Self::new(Arc::new(spec), Arc::new(price)))
    }

    /// Model behind `/predict/spec_score`.
    pub fn spec(&self) -> &Arc<dyn Predictor> {
        &self.spec
    }

    /// Model behind `/predict/price`.
    pub fn price(&self) -> &Arc<dyn Predictor> {
        &self.price
    }
}
