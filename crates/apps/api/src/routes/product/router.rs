use crate::api_state::ApiContext;
use crate::product::handlers::{
    create_category_handler, create_media_handler, create_product_handler,
    delete_category_handler, delete_media_handler, delete_product_handler, get_product_handler,
    list_categories_handler, list_media_handler, list_products_handler, product_detail_handler,
    public_catalogue_handler, update_product_handler,
};
use axum::{
    Router,
    routing::{delete, get},
};

pub fn product_public_router() -> Router<ApiContext> {
    Router::new()
        .route("/web/products", get(public_catalogue_handler))
        .route("/web/products/{product_id}", get(product_detail_handler))
}

pub fn product_admin_router() -> Router<ApiContext> {
    Router::new()
        .route(
            "/admin/product-categories",
            get(list_categories_handler).post(create_category_handler),
        )
        .route(
            "/admin/product-categories/{category_id}",
            delete(delete_category_handler),
        )
        .route(
            "/admin/products",
            get(list_products_handler).post(create_product_handler),
        )
        .route(
            "/admin/products/{product_id}",
            get(get_product_handler)
                .patch(update_product_handler)
                .delete(delete_product_handler),
        )
        .route(
            "/admin/products/{product_id}/media",
            get(list_media_handler).post(create_media_handler),
        )
        .route(
            "/admin/products/{product_id}/media/{media_id}",
            delete(delete_media_handler),
        )
}
