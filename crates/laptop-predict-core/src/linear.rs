//! Linear regression models.

use serde::{Deserialize, Serialize};

use crate::Predictor;

/// `intercept + Σ coefficients[i] * row[i]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub coefficients: Vec<f64>,
    #[serde(default)]
    pub intercept: f64,
}

impl LinearModel {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.coefficients.is_empty() {
            return Err("linear model has no coefficients".into());
        }
        if let Some(i) = self.coefficients.iter().position(|c| !c.is_finite()) {
            return Err(format!("coefficient {i} is not finite"));
        }
        if !self.intercept.is_finite() {
            return Err("intercept is not finite".into());
        }
        Ok(())
    }
}

impl Predictor for LinearModel {
    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict_row(&self, row: &[f64]) -> f64 {
        self.coefficients
            .iter()
            .zip(row)
            .fold(self.intercept, |acc, (c, x)| acc + c * x)
    }
}
