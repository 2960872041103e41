use laptop_predict_core::{ModelError, Predictor};
use tracing::{debug, warn};

use crate::error::AppError;

/// Runs one feature vector through `model` as a single-row input.
pub fn predict(endpoint: &str, model: &dyn Predictor, features: &[f64]) -> Result<f64, AppError> {
    let prediction = model.predict(features).map_err(|e| {
        if let ModelError::DimensionMismatch { .. } = e {
            warn!(endpoint, "Rejected feature vector: {}", e);
        }
        AppError::from(e)
    })?;

    debug!(endpoint, n_features = features.len(), prediction, "Prediction complete");
    Ok(prediction)
}

#[cfg(test)]
mod tests {
    use laptop_predict_core::LinearModel;

    use super::*;

    #[test]
    fn test_predict_returns_model_output() {
        let model = LinearModel::new(vec![1.0, 2.0], 3.0);
        assert_eq!(predict("price", &model, &[1.0, 1.0]).unwrap(), 6.0);
    }

    #[test]
    fn test_predict_rejects_wrong_width() {
        let model = LinearModel::new(vec![1.0, 2.0], 3.0);
        let err = predict("price", &model, &[1.0, 1.0, 1.0]).unwrap_err();
        assert!(matches!(
            err,
            AppError::DimensionMismatch {
                expected: 2,
                actual: 3
            }
        ));
    }
}
