use crate::api_state::ApiContext;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use common_services::api::enquiry::error::EnquiryError;
use common_services::api::enquiry::interfaces::EnquiryRequest;
use common_services::api::enquiry::service;
use common_services::api::gallery::interfaces::SearchParams;
use common_services::database::enquiry::Enquiry;
use tracing::instrument;

/// Stores an enquiry sent from the home page form.
#[utoipa::path(
    post,
    path = "/enquiry",
    tag = "Website",
    request_body = EnquiryRequest,
    responses(
        (status = 201, description = "Enquiry stored", body = Enquiry),
        (status = 400, description = "One or more fields are missing"),
    )
)]
#[instrument(skip(context, payload), err(Debug))]
pub async fn submit_enquiry_handler(
    State(context): State<ApiContext>,
    Json(payload): Json<EnquiryRequest>,
) -> Result<(StatusCode, Json<Enquiry>), EnquiryError> {
    let enquiry = service::submit_enquiry(&context.pool, &payload).await?;
    Ok((StatusCode::CREATED, Json(enquiry)))
}

/// Stores an enquiry sent from the contact page and mails staff about it.
///
/// Responds as soon as the enquiry is stored. The notification is sent in the background.
#[utoipa::path(
    post,
    path = "/web/contact-us",
    tag = "Website",
    request_body = EnquiryRequest,
    responses(
        (status = 201, description = "Enquiry stored", body = Enquiry),
        (status = 400, description = "One or more fields are missing"),
    )
)]
#[instrument(skip(context, payload), err(Debug))]
pub async fn contact_us_handler(
    State(context): State<ApiContext>,
    Json(payload): Json<EnquiryRequest>,
) -> Result<(StatusCode, Json<Enquiry>), EnquiryError> {
    let enquiry = service::submit_contact_enquiry(
        &context.pool,
        context.mailer.clone(),
        &context.settings.mail,
        &payload,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(enquiry)))
}

#[utoipa::path(
    get,
    path = "/admin/enquiries",
    tag = "Enquiries",
    params(SearchParams),
    responses((status = 200, description = "Enquiries, newest first", body = Vec<Enquiry>)),
    security(("bearer_auth" = []))
)]
pub async fn list_enquiries_handler(
    State(context): State<ApiContext>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Enquiry>>, EnquiryError> {
    Ok(Json(
        service::list_enquiries(&context.pool, params.search.as_deref()).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/admin/enquiries/{enquiry_id}",
    tag = "Enquiries",
    params(("enquiry_id" = i32, Path, description = "Enquiry id")),
    responses(
        (status = 204, description = "Enquiry deleted"),
        (status = 404, description = "Enquiry not found"),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context), err(Debug))]
pub async fn delete_enquiry_handler(
    State(context): State<ApiContext>,
    Path(enquiry_id): Path<i32>,
) -> Result<StatusCode, EnquiryError> {
    service::delete_enquiry(&context.pool, enquiry_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
