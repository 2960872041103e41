use serde::{Deserialize, Serialize};

// === HTTP DTOs ===

/// Request body shared by both prediction routes.
#[derive(Debug, Deserialize)]
pub struct FeaturesRequest {
    pub features: Vec<f64>,
}

#[derive(Debug, Serialize)]
pub struct SpecScoreResponse {
    pub spec_score: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PriceResponse {
    pub price: f64,
}
