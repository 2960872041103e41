//! Prediction HTTP handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::{extract::State, Json};

use crate::dto::{FeaturesRequest, PriceResponse, SpecScoreResponse};
use crate::error::AppError;
use crate::services::predict as predict_service;
use crate::ServerState;

/// POST /predict/spec_score - Predicts the spec score for one laptop.
pub async fn spec_score(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<FeaturesRequest>, JsonRejection>,
) -> Result<Json<SpecScoreResponse>, AppError> {
    let Json(req) = payload?;
    let spec_score =
        predict_service::predict("spec_score", state.models.spec().as_ref(), &req.features)?;
    Ok(Json(SpecScoreResponse { spec_score }))
}

/// POST /predict/price - Predicts the price for one laptop.
pub async fn price(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<FeaturesRequest>, JsonRejection>,
) -> Result<Json<PriceResponse>, AppError> {
    let Json(req) = payload?;
    let price = predict_service::predict("price", state.models.price().as_ref(), &req.features)?;
    Ok(Json(PriceResponse { price }))
}
