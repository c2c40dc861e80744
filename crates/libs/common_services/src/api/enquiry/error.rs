use crate::database::DbError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum EnquiryError {
    #[error("All fields are required")]
    MissingFields(Vec<&'static str>),

    #[error("Enquiry {0} not found")]
    NotFound(i32),

    #[error("database error")]
    Database(#[from] DbError),
}

impl IntoResponse for EnquiryError {
    fn into_response(self) -> Response {
        match &self {
            Self::MissingFields(fields) => info!("Rejected enquiry, missing: {fields:?}"),
            Self::NotFound(id) => info!("Enquiry {id} not found"),
            Self::Database(e) => error!("Enquiry database error: {e}"),
        }

        let (status, body) = match self {
            Self::MissingFields(fields) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "All fields are required", "missingFields": fields }),
            ),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, json!({ "error": self.to_string() })),
            Self::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "A database error occurred." }),
            ),
        };
        (status, Json(body)).into_response()
    }
}
