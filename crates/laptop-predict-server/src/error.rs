//! Application error types and Axum response conversion.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use laptop_predict_core::ModelError;
use serde::Serialize;

/// Application-level errors with HTTP status code mapping.
#[derive(Debug)]
pub enum AppError {
    /// The request body failed to deserialize into the request schema.
    Rejected { status: StatusCode, message: String },
    /// The feature vector width does not match the model.
    DimensionMismatch { expected: usize, actual: usize },
    Internal(String),
}

impl AppError {
    /// Creates an Internal error from any error type.
    pub fn internal(e: impl std::fmt::Display) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<ModelError> for AppError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::DimensionMismatch { expected, actual } => {
                AppError::DimensionMismatch { expected, actual }
            }
            other => AppError::internal(other),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::Rejected { status, message } => (status, message),
            AppError::DimensionMismatch { expected, actual } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("expected {expected} features, got {actual}"),
            ),
            AppError::Internal(message) => {
                tracing::error!("Internal error: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };
        (status, Json(ErrorResponse { error })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_is_client_error() {
        let err = AppError::from(ModelError::DimensionMismatch {
            expected: 5,
            actual: 4,
        });
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_non_finite_prediction_is_server_error() {
        let err = AppError::from(ModelError::NonFinite(f64::NAN));
        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
