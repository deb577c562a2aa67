use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use roster_store::StoreError;
use roster_types::ErrorBody;
use roster_validate::{SerializationError, ValidationError};
use thiserror::Error;
use tracing::{error, warn};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Serialization(#[from] SerializationError),
    #[error("Cannot {method} {path}")]
    RouteNotFound { method: String, path: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(StoreError::NotFound(_)) | ApiError::RouteNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            ApiError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_body(&self) -> ErrorBody {
        let status = self.status();
        let (message, errors) = match self {
            ApiError::Validation(e) => ("Validation failed".to_string(), Some(e.issues.clone())),
            ApiError::Serialization(_) => ("Internal server error".to_string(), None),
            other => (other.to_string(), None),
        };
        ErrorBody {
            status_code: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message,
            errors,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Serialization(e) => error!("{}", e),
            other => warn!("Request rejected: {}", other),
        }
        (self.status(), Json(self.to_body())).into_response()
    }
}
