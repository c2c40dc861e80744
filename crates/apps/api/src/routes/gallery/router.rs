use crate::api_state::ApiContext;
use crate::gallery::handlers::{
    create_category_handler, create_photo_handler, delete_category_handler, delete_photo_handler,
    home_page_photos_handler, list_categories_handler, list_photos_handler,
    public_gallery_handler, set_home_page_handler,
};
use axum::{
    Router,
    routing::{delete, get, post},
};

pub fn gallery_public_router() -> Router<ApiContext> {
    Router::new()
        .route("/web/photos", get(public_gallery_handler))
        .route("/web/photos/home", get(home_page_photos_handler))
}

pub fn gallery_admin_router() -> Router<ApiContext> {
    Router::new()
        .route(
            "/admin/photo-categories",
            get(list_categories_handler).post(create_category_handler),
        )
        .route(
            "/admin/photo-categories/{category_id}",
            delete(delete_category_handler),
        )
        .route(
            "/admin/photos",
            get(list_photos_handler).post(create_photo_handler),
        )
        .route("/admin/photos/home-page", post(set_home_page_handler))
        .route("/admin/photos/{photo_id}", delete(delete_photo_handler))
}
