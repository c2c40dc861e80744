use crate::api_state::ApiContext;
use crate::enquiry::handlers::{
    contact_us_handler, delete_enquiry_handler, list_enquiries_handler, submit_enquiry_handler,
};
use axum::{
    Router,
    routing::{delete, get, post},
};

pub fn enquiry_public_router() -> Router<ApiContext> {
    Router::new()
        .route("/enquiry", post(submit_enquiry_handler))
        .route("/web/contact-us", post(contact_us_handler))
}

pub fn enquiry_admin_router() -> Router<ApiContext> {
    Router::new()
        .route("/admin/enquiries", get(list_enquiries_handler))
        .route("/admin/enquiries/{enquiry_id}", delete(delete_enquiry_handler))
}
