use crate::api_state::ApiContext;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::error;

/// Liveness probe for the load balancer. Answers 503 while the database is unreachable.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    responses(
        (status = 200, description = "Database reachable", body = String),
        (status = 503, description = "Database unreachable"),
    )
)]
pub async fn health_check(State(context): State<ApiContext>) -> Result<&'static str, StatusCode> {
    if let Err(e) = sqlx::query("SELECT 1").execute(&context.pool).await {
        error!("Health check could not reach the database: {e}");
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }
    Ok("OK")
}
