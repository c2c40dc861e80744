use crate::api_state::ApiContext;
use axum::Json;
use axum::extract::State;
use common_services::api::dashboard::interfaces::DashboardCounts;
use common_services::api::dashboard::service::dashboard_counts;
use common_services::database::DbError;

/// Counts of enquiries, photos, videos and products for the back-office landing page.
#[utoipa::path(
    get,
    path = "/admin/dashboard",
    tag = "Dashboard",
    responses((status = 200, description = "Record counts", body = DashboardCounts)),
    security(("bearer_auth" = []))
)]
pub async fn dashboard_handler(
    State(context): State<ApiContext>,
) -> Result<Json<DashboardCounts>, DbError> {
    Ok(Json(dashboard_counts(&context.pool).await?))
}
