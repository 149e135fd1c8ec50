//! HTTP error mapping.
//!
//! Every failure a handler can produce becomes a status code plus a
//! `{"error": "<message>"}` body. Storage causes are logged here and never
//! reach the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use todo_core::{StoreError, ValidationError};
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid todo ID")]
    InvalidId,

    #[error("Invalid request data")]
    InvalidBody,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Todo not found")]
    NotFound,

    /// The payload names the operation, e.g. "retrieve todos".
    #[error("Failed to {0}")]
    Storage(&'static str),
}

impl ApiError {
    /// Map a store failure, logging anything that is not a plain miss.
    /// `id` is the record the operation targeted, if any.
    pub fn from_store(err: StoreError, action: &'static str, id: Option<i64>) -> Self {
        match err {
            StoreError::NotFound(_) => ApiError::NotFound,
            StoreError::Database(source) => {
                error!(action, id = ?id, error = %source, "storage failure");
                ApiError::Storage(action)
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidId | ApiError::InvalidBody | ApiError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
