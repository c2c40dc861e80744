use crate::database::DbError;
use crate::storage::StorageError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use color_eyre::eyre;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("database error")]
    Database(#[from] DbError),

    #[error("file storage error")]
    Storage(#[from] StorageError),

    #[error("internal error")]
    Internal(#[from] eyre::Report),

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),
}

impl From<sqlx::Error> for ProductError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.into())
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        match &self {
            Self::Database(DbError::UniqueViolation(e)) => warn!("Duplicate product data: {e}"),
            Self::Database(e) => error!("Product database error: {e}"),
            Self::Storage(e) => error!("Product storage error: {e}"),
            Self::Internal(e) => error!("Product internal error: {e:?}"),
            Self::NotFound(what) => warn!("Not found: {what}"),
            Self::Validation(msg) => warn!("Rejected product input: {msg}"),
        }

        let (status, error_message) = match self {
            Self::Database(DbError::UniqueViolation(_)) => (
                StatusCode::CONFLICT,
                "A category with this name already exists.".to_owned(),
            ),
            Self::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "A database error occurred.".to_owned(),
            ),
            Self::Storage(_) | Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected internal error occurred.".to_owned(),
            ),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            Self::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
