use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::novelty::NoveltyError;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("novelty evaluation failed: {0}")]
    EvaluationFailed(#[from] NoveltyError),

    #[error("store error: {0}")]
    StoreUnavailable(#[from] StoreError),
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        // Internal failure detail stays in the server logs; the client only
        // sees a generic message and the status.
        let (status, message) = match &self {
            GatewayError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            GatewayError::EvaluationFailed(NoveltyError::Embedding(cause)) => {
                error!(error = %cause, "embedding provider failure");
                (
                    StatusCode::BAD_GATEWAY,
                    "embedding provider unavailable".to_string(),
                )
            }
            GatewayError::EvaluationFailed(NoveltyError::Store(cause)) => {
                error!(error = %cause, "store failure during evaluation");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "novelty evaluation failed".to_string(),
                )
            }
            GatewayError::StoreUnavailable(cause) => {
                error!(error = %cause, "store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "store unavailable".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: message,
            code: status.as_u16(),
        });

        (status, body).into_response()
    }
}
