use crate::database::DbError;
use crate::storage::StorageError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use color_eyre::eyre;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Errors of the photo and video galleries.
#[derive(Debug, Error)]
pub enum GalleryError {
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

impl From<sqlx::Error> for GalleryError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.into())
    }
}

fn log_gallery_failure(error: &GalleryError) {
    match error {
        GalleryError::Database(e) => error!("Gallery database error: {e}"),
        GalleryError::Storage(e) => error!("Gallery storage error: {e}"),
        GalleryError::Internal(e) => error!("Gallery internal error: {e:?}"),
        GalleryError::NotFound(what) => warn!("Gallery item not found: {what}"),
        GalleryError::Validation(msg) => warn!("Rejected gallery input: {msg}"),
    }
}

impl IntoResponse for GalleryError {
    fn into_response(self) -> Response {
        log_gallery_failure(&self);

        let (status, error_message) = match self {
            Self::Database(DbError::UniqueViolation(_)) => (
                StatusCode::CONFLICT,
                "An item with these details already exists.".to_owned(),
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
