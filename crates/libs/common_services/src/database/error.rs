use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlx(sqlx::Error),

    #[error("Unique constraint violated: {0}")]
    UniqueViolation(sqlx::Error),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        let is_unique_violation = err
            .as_database_error()
            .is_some_and(|db_err| db_err.is_unique_violation());
        if is_unique_violation {
            Self::UniqueViolation(err)
        } else {
            Self::Sqlx(err)
        }
    }
}

impl IntoResponse for DbError {
    fn into_response(self) -> Response {
        error!("{self}");
        let (status, error_message) = match self {
            Self::UniqueViolation(_) => (StatusCode::CONFLICT, "This record already exists."),
            Self::Sqlx(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "A database error occurred.",
            ),
        };
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
