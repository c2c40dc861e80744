//! Photo gallery: public pages and back-office management.

use crate::api_state::ApiContext;
use crate::form_data::FormData;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use common_services::api::gallery::error::GalleryError;
use common_services::api::gallery::interfaces::{
    CreatePhotoCategoryRequest, GalleryCategory, HomePageFlagRequest, NewPhoto, PhotoListParams,
    PhotoResponse, SearchParams, UpdatedCount,
};
use common_services::api::gallery::service;
use common_services::database::photo::{PhotoCategory, PhotoCategoryWithCount};
use tracing::instrument;

// --- Public ---

/// Every photo category, ordered by name, with its photos.
#[utoipa::path(
    get,
    path = "/web/photos",
    tag = "Website",
    responses((status = 200, description = "Photo gallery", body = Vec<GalleryCategory>))
)]
pub async fn public_gallery_handler(
    State(context): State<ApiContext>,
) -> Result<Json<Vec<GalleryCategory>>, GalleryError> {
    Ok(Json(
        service::public_gallery(&context.pool, &context.files).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/web/photos/home",
    tag = "Website",
    responses((status = 200, description = "Photos flagged for the home page", body = Vec<PhotoResponse>))
)]
pub async fn home_page_photos_handler(
    State(context): State<ApiContext>,
) -> Result<Json<Vec<PhotoResponse>>, GalleryError> {
    Ok(Json(
        service::home_page_photos(&context.pool, &context.files).await?,
    ))
}

// --- Admin: categories ---

#[utoipa::path(
    get,
    path = "/admin/photo-categories",
    tag = "Gallery",
    params(SearchParams),
    responses((status = 200, description = "Photo categories with photo counts", body = Vec<PhotoCategoryWithCount>)),
    security(("bearer_auth" = []))
)]
pub async fn list_categories_handler(
    State(context): State<ApiContext>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<PhotoCategoryWithCount>>, GalleryError> {
    Ok(Json(
        service::list_categories(&context.pool, params.search.as_deref()).await?,
    ))
}

#[utoipa::path(
    post,
    path = "/admin/photo-categories",
    tag = "Gallery",
    request_body = CreatePhotoCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = PhotoCategory),
        (status = 400, description = "Name missing"),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context, payload), err(Debug))]
pub async fn create_category_handler(
    State(context): State<ApiContext>,
    Json(payload): Json<CreatePhotoCategoryRequest>,
) -> Result<(StatusCode, Json<PhotoCategory>), GalleryError> {
    let category = service::create_category(&context.pool, &payload.name).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Deletes a category with all of its photos and their files.
#[utoipa::path(
    delete,
    path = "/admin/photo-categories/{category_id}",
    tag = "Gallery",
    params(("category_id" = i32, Path, description = "Photo category id")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 404, description = "Category not found"),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context), err(Debug))]
pub async fn delete_category_handler(
    State(context): State<ApiContext>,
    Path(category_id): Path<i32>,
) -> Result<StatusCode, GalleryError> {
    service::delete_category(&context.pool, &context.files, category_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// --- Admin: photos ---

#[utoipa::path(
    get,
    path = "/admin/photos",
    tag = "Gallery",
    params(PhotoListParams),
    responses((status = 200, description = "Photos, newest first", body = Vec<PhotoResponse>)),
    security(("bearer_auth" = []))
)]
pub async fn list_photos_handler(
    State(context): State<ApiContext>,
    Query(params): Query<PhotoListParams>,
) -> Result<Json<Vec<PhotoResponse>>, GalleryError> {
    Ok(Json(
        service::list_photos(&context.pool, &context.files, &params).await?,
    ))
}

/// Uploads a photo. Multipart fields: `categoryId`, `caption`, `description`,
/// `showOnHomePage` and the `image` file.
#[utoipa::path(
    post,
    path = "/admin/photos",
    tag = "Gallery",
    request_body(content_type = "multipart/form-data", description = "Photo form"),
    responses(
        (status = 201, description = "Photo created", body = PhotoResponse),
        (status = 400, description = "Missing category or image"),
        (status = 404, description = "Category not found"),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context, multipart), err(Debug))]
pub async fn create_photo_handler(
    State(context): State<ApiContext>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<PhotoResponse>), GalleryError> {
    let mut form = FormData::from_multipart(multipart).await?;
    let new_photo = NewPhoto {
        category_id: form.parse("categoryId")?,
        caption: form.text("caption"),
        description: form.text("description"),
        show_on_home_page: form.flag("showOnHomePage")?,
        image: form.take_file("image"),
    };
    let photo = service::create_photo(&context.pool, &context.files, new_photo).await?;
    Ok((StatusCode::CREATED, Json(photo)))
}

#[utoipa::path(
    delete,
    path = "/admin/photos/{photo_id}",
    tag = "Gallery",
    params(("photo_id" = i32, Path, description = "Photo id")),
    responses(
        (status = 204, description = "Photo and image file deleted"),
        (status = 404, description = "Photo not found"),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context), err(Debug))]
pub async fn delete_photo_handler(
    State(context): State<ApiContext>,
    Path(photo_id): Path<i32>,
) -> Result<StatusCode, GalleryError> {
    service::delete_photo(&context.pool, &context.files, photo_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Shows or hides a batch of photos on the home page.
#[utoipa::path(
    post,
    path = "/admin/photos/home-page",
    tag = "Gallery",
    request_body = HomePageFlagRequest,
    responses((status = 200, description = "Number of photos updated", body = UpdatedCount)),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context, payload), err(Debug))]
pub async fn set_home_page_handler(
    State(context): State<ApiContext>,
    Json(payload): Json<HomePageFlagRequest>,
) -> Result<Json<UpdatedCount>, GalleryError> {
    let updated = service::set_home_page(&context.pool, &payload.ids, payload.show).await?;
    Ok(Json(UpdatedCount { updated }))
}
