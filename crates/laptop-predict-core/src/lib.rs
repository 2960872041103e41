//! Pretrained regression models for laptop spec score and price prediction.
//!
//! Models are exported by the training pipeline as JSON artifacts and loaded
//! once at startup through [`ModelStore`]. After loading they are read-only
//! and shared across requests behind `Arc<dyn Predictor>`.

mod error;
mod linear;
mod store;
mod tree;

pub use error::ModelError;
pub use linear::LinearModel;
pub use store::{load_model, ModelStore};
pub use tree::{Aggregation, Tree, TreeEnsemble, LEAF};

use serde::{Deserialize, Serialize};

/// A regression model mapping one fixed-width row to one scalar.
pub trait Predictor: Send + Sync {
    /// Number of features the model was trained on.
    fn n_features(&self) -> usize;

    /// Evaluates a row of exactly `n_features()` values.
    fn predict_row(&self, row: &[f64]) -> f64;

    /// Checks the row width, evaluates it, and rejects non-finite outputs.
    fn predict(&self, row: &[f64]) -> Result<f64, ModelError> {
        let expected = self.n_features();
        if row.len() != expected {
            return Err(ModelError::DimensionMismatch {
                expected,
                actual: row.len(),
            });
        }
        let prediction = self.predict_row(row);
        if !prediction.is_finite() {
            return Err(ModelError::NonFinite(prediction));
        }
        Ok(prediction)
    }
}

/// Any model kind a JSON artifact can hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Model {
    Linear(LinearModel),
    TreeEnsemble(TreeEnsemble),
}

impl Model {
    pub fn kind(&self) -> &'static str {
        match self {
            Model::Linear(_) => "linear",
            Model::TreeEnsemble(_) => "tree_ensemble",
        }
    }

    fn validate(&self) -> Result<(), String> {
        match self {
            Model::Linear(m) => m.validate(),
            // Checked on construction.
            Model::TreeEnsemble(_) => Ok(()),
        }
    }
}

impl Predictor for Model {
    fn n_features(&self) -> usize {
        match self {
            Model::Linear(m) => m.n_features(),
            Model::TreeEnsemble(m) => m.n_features(),
        }
    }

    fn predict_row(&self, row: &[f64]) -> f64 {
        match self {
            Model::Linear(m) => m.predict_row(row),
            Model::TreeEnsemble(m) => m.predict_row(row),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predict_checks_width() {
        let model = Model::Linear(LinearModel::new(vec![1.0, 1.0, 1.0, 1.0], 0.0));
        let err = model.predict(&[1.0, 2.0]).unwrap_err();
        assert!(matches!(
            err,
            ModelError::DimensionMismatch {
                expected: 4,
                actual: 2
            }
        ));
        assert_eq!(err.to_string(), "Expected 4 features, got 2");
    }

    #[test]
    fn test_predict_rejects_non_finite_output() {
        let model = LinearModel::new(vec![f64::MAX, f64::MAX], 0.0);
        assert!(matches!(
            model.predict(&[f64::MAX, f64::MAX]),
            Err(ModelError::NonFinite(_))
        ));
    }

    #[test]
    fn test_predict_is_deterministic() {
        let model = Model::TreeEnsemble(
            TreeEnsemble::try_new(1, Aggregation::Mean, vec![Tree::leaf(2.0), Tree::leaf(4.0)])
                .unwrap(),
        );
        let first = model.predict(&[0.5]).unwrap();
        let second = model.predict(&[0.5]).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, 3.0);
    }

    #[test]
    fn test_model_kind_tag() {
        let json = r#"{"kind": "linear", "coefficients": [0.5, 0.25], "intercept": 1.0}"#;
        let model: Model = serde_json::from_str(json).unwrap();
        assert_eq!(model.kind(), "linear");
        assert_eq!(model.n_features(), 2);

        let json = r#"{
            "kind": "tree_ensemble",
            "n_features": 3,
            "aggregation": {"type": "boosted", "base_score": 1.0, "learning_rate": 0.5},
            "trees": [{"children_left": [-1], "children_right": [-1],
                       "feature": [-2], "threshold": [-2.0], "value": [4.0]}]
        }"#;
        let model: Model = serde_json::from_str(json).unwrap();
        assert_eq!(model.kind(), "tree_ensemble");
        assert_eq!(model.predict(&[0.0, 0.0, 0.0]).unwrap(), 3.0);
    }
}
