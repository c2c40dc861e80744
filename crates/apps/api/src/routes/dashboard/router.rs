use crate::api_state::ApiContext;
use crate::dashboard::handlers::dashboard_handler;
use axum::{Router, routing::get};

pub fn dashboard_admin_router() -> Router<ApiContext> {
    Router::new().route("/admin/dashboard", get(dashboard_handler))
}
