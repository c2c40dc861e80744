//! Product catalogue: public pages plus category, product and media management.

use crate::api_state::ApiContext;
use crate::form_data::FormData;
use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use common_services::api::gallery::interfaces::SearchParams;
use common_services::api::product::error::ProductError;
use common_services::api::product::interfaces::{
    CatalogueCategory, CreateProductCategoryRequest, NewMedia, NewProduct, ProductDetail,
    ProductMediaResponse, ProductResponse, ProductUpdate,
};
use common_services::api::product::service;
use common_services::database::product::{ProductCategory, ProductCategoryWithCount};
use tracing::instrument;

// --- Public ---

#[utoipa::path(
    get,
    path = "/web/products",
    tag = "Website",
    responses((status = 200, description = "Categories by name with their products", body = Vec<CatalogueCategory>))
)]
pub async fn public_catalogue_handler(
    State(context): State<ApiContext>,
) -> Result<Json<Vec<CatalogueCategory>>, ProductError> {
    Ok(Json(
        service::public_catalogue(&context.pool, &context.files).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/web/products/{product_id}",
    tag = "Website",
    params(("product_id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product with media slider and related products", body = ProductDetail),
        (status = 404, description = "Product not found"),
    )
)]
pub async fn product_detail_handler(
    State(context): State<ApiContext>,
    Path(product_id): Path<i32>,
) -> Result<Json<ProductDetail>, ProductError> {
    Ok(Json(
        service::product_detail(&context.pool, &context.files, product_id).await?,
    ))
}

// --- Admin: categories ---

#[utoipa::path(
    get,
    path = "/admin/product-categories",
    tag = "Products",
    params(SearchParams),
    responses((status = 200, description = "Categories with product counts, newest first", body = Vec<ProductCategoryWithCount>)),
    security(("bearer_auth" = []))
)]
pub async fn list_categories_handler(
    State(context): State<ApiContext>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<ProductCategoryWithCount>>, ProductError> {
    Ok(Json(
        service::list_categories(&context.pool, params.search.as_deref()).await?,
    ))
}

#[utoipa::path(
    post,
    path = "/admin/product-categories",
    tag = "Products",
    request_body = CreateProductCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = ProductCategory),
        (status = 400, description = "Name missing"),
        (status = 409, description = "A category with this name already exists"),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context, payload), err(Debug))]
pub async fn create_category_handler(
    State(context): State<ApiContext>,
    Json(payload): Json<CreateProductCategoryRequest>,
) -> Result<(StatusCode, Json<ProductCategory>), ProductError> {
    let category = service::create_category(&context.pool, &payload).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

#[utoipa::path(
    delete,
    path = "/admin/product-categories/{category_id}",
    tag = "Products",
    params(("category_id" = i32, Path, description = "Product category id")),
    responses(
        (status = 204, description = "Category, its products and their files deleted"),
        (status = 404, description = "Category not found"),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context), err(Debug))]
pub async fn delete_category_handler(
    State(context): State<ApiContext>,
    Path(category_id): Path<i32>,
) -> Result<StatusCode, ProductError> {
    service::delete_category(&context.pool, &context.files, category_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// --- Admin: products ---

#[utoipa::path(
    get,
    path = "/admin/products",
    tag = "Products",
    params(SearchParams),
    responses((status = 200, description = "Products with media counts, newest first", body = Vec<ProductResponse>)),
    security(("bearer_auth" = []))
)]
pub async fn list_products_handler(
    State(context): State<ApiContext>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<ProductResponse>>, ProductError> {
    Ok(Json(
        service::list_products(&context.pool, &context.files, params.search.as_deref()).await?,
    ))
}

/// Creates a product. Multipart fields: `categoryId`, `title`, `description`
/// and the optional `catalogue` and `image` files.
#[utoipa::path(
    post,
    path = "/admin/products",
    tag = "Products",
    request_body(content_type = "multipart/form-data", description = "Product form"),
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Category or title missing"),
        (status = 404, description = "Category not found"),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context, multipart), err(Debug))]
pub async fn create_product_handler(
    State(context): State<ApiContext>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ProductResponse>), ProductError> {
    let mut form = FormData::from_multipart(multipart).await?;
    let new_product = NewProduct {
        category_id: form.parse("categoryId")?,
        title: form.text("title"),
        description: form.text("description"),
        catalogue: form.take_file("catalogue"),
        image: form.take_file("image"),
    };
    let product = service::create_product(&context.pool, &context.files, new_product).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(
    get,
    path = "/admin/products/{product_id}",
    tag = "Products",
    params(("product_id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product", body = ProductResponse),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_product_handler(
    State(context): State<ApiContext>,
    Path(product_id): Path<i32>,
) -> Result<Json<ProductResponse>, ProductError> {
    Ok(Json(
        service::get_product(&context.pool, &context.files, product_id).await?,
    ))
}

/// Changes any subset of a product's fields. Uploaded files replace the current ones.
#[utoipa::path(
    patch,
    path = "/admin/products/{product_id}",
    tag = "Products",
    params(("product_id" = i32, Path, description = "Product id")),
    request_body(content_type = "multipart/form-data", description = "Changed product fields"),
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 404, description = "Product or category not found"),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context, multipart), err(Debug))]
pub async fn update_product_handler(
    State(context): State<ApiContext>,
    Path(product_id): Path<i32>,
    multipart: Multipart,
) -> Result<Json<ProductResponse>, ProductError> {
    let mut form = FormData::from_multipart(multipart).await?;
    let update = ProductUpdate {
        category_id: form.parse("categoryId")?,
        title: form.text("title"),
        description: form.text("description"),
        catalogue: form.take_file("catalogue"),
        image: form.take_file("image"),
    };
    Ok(Json(
        service::update_product(&context.pool, &context.files, product_id, update).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/admin/products/{product_id}",
    tag = "Products",
    params(("product_id" = i32, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product, its media and files deleted"),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context), err(Debug))]
pub async fn delete_product_handler(
    State(context): State<ApiContext>,
    Path(product_id): Path<i32>,
) -> Result<StatusCode, ProductError> {
    service::delete_product(&context.pool, &context.files, product_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// --- Admin: media ---

#[utoipa::path(
    get,
    path = "/admin/products/{product_id}/media",
    tag = "Products",
    params(("product_id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Media slides in display order", body = Vec<ProductMediaResponse>),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_media_handler(
    State(context): State<ApiContext>,
    Path(product_id): Path<i32>,
) -> Result<Json<Vec<ProductMediaResponse>>, ProductError> {
    Ok(Json(
        service::list_media(&context.pool, &context.files, product_id).await?,
    ))
}

/// Adds a media slide. Multipart fields: `kind` (`image` or `video`), `file`, `url`,
/// `thumbnail` and `displayOrder`.
#[utoipa::path(
    post,
    path = "/admin/products/{product_id}/media",
    tag = "Products",
    params(("product_id" = i32, Path, description = "Product id")),
    request_body(content_type = "multipart/form-data", description = "Media slide form"),
    responses(
        (status = 201, description = "Media slide created", body = ProductMediaResponse),
        (status = 400, description = "Neither a file nor a URL was given"),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context, multipart), err(Debug))]
pub async fn create_media_handler(
    State(context): State<ApiContext>,
    Path(product_id): Path<i32>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ProductMediaResponse>), ProductError> {
    let mut form = FormData::from_multipart(multipart).await?;
    let new_media = NewMedia {
        kind: form.parse("kind")?.unwrap_or_default(),
        file: form.take_file("file"),
        url: form.text("url"),
        thumbnail: form.take_file("thumbnail"),
        display_order: form.parse("displayOrder")?,
    };
    let media =
        service::create_media(&context.pool, &context.files, product_id, new_media).await?;
    Ok((StatusCode::CREATED, Json(media)))
}

#[utoipa::path(
    delete,
    path = "/admin/products/{product_id}/media/{media_id}",
    tag = "Products",
    params(
        ("product_id" = i32, Path, description = "Product id"),
        ("media_id" = i32, Path, description = "Media slide id"),
    ),
    responses(
        (status = 204, description = "Media slide and its files deleted"),
        (status = 404, description = "Media slide not found"),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context), err(Debug))]
pub async fn delete_media_handler(
    State(context): State<ApiContext>,
    Path((product_id, media_id)): Path<(i32, i32)>,
) -> Result<StatusCode, ProductError> {
    service::delete_media(&context.pool, &context.files, product_id, media_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
