use crate::api_state::ApiContext;
use crate::form_data::FormData;
use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use common_services::api::gallery::error::GalleryError;
use common_services::api::gallery::interfaces::{
    NewVideo, PublicVideo, SearchParams, VideoPreviewParams, VideoResponse,
};
use common_services::api::video::service;
use common_types::video_link::VideoRef;
use tracing::instrument;

/// Playable videos. Entries whose link cannot be resolved are left out.
#[utoipa::path(
    get,
    path = "/web/videos",
    tag = "Website",
    responses((status = 200, description = "Video gallery", body = Vec<PublicVideo>))
)]
pub async fn public_videos_handler(
    State(context): State<ApiContext>,
) -> Result<Json<Vec<PublicVideo>>, GalleryError> {
    Ok(Json(
        service::public_videos(&context.pool, &context.files).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/admin/videos",
    tag = "Gallery",
    params(SearchParams),
    responses((status = 200, description = "Videos with previews, newest first", body = Vec<VideoResponse>)),
    security(("bearer_auth" = []))
)]
pub async fn list_videos_handler(
    State(context): State<ApiContext>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<VideoResponse>>, GalleryError> {
    Ok(Json(
        service::list_videos(&context.pool, &context.files, params.search.as_deref()).await?,
    ))
}

/// Adds a video. Multipart fields: `caption`, `videoLink` and an optional `thumbnail` file.
#[utoipa::path(
    post,
    path = "/admin/videos",
    tag = "Gallery",
    request_body(content_type = "multipart/form-data", description = "Video form"),
    responses(
        (status = 201, description = "Video created", body = VideoResponse),
        (status = 400, description = "The link does not point at a recognisable video"),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context, multipart), err(Debug))]
pub async fn create_video_handler(
    State(context): State<ApiContext>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<VideoResponse>), GalleryError> {
    let mut form = FormData::from_multipart(multipart).await?;
    let new_video = NewVideo {
        caption: form.text("caption"),
        video_link: form.text("videoLink"),
        thumbnail: form.take_file("thumbnail"),
    };
    let video = service::create_video(&context.pool, &context.files, new_video).await?;
    Ok((StatusCode::CREATED, Json(video)))
}

#[utoipa::path(
    delete,
    path = "/admin/videos/{video_id}",
    tag = "Gallery",
    params(("video_id" = i32, Path, description = "Video id")),
    responses(
        (status = 204, description = "Video deleted"),
        (status = 404, description = "Video not found"),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context), err(Debug))]
pub async fn delete_video_handler(
    State(context): State<ApiContext>,
    Path(video_id): Path<i32>,
) -> Result<StatusCode, GalleryError> {
    service::delete_video(&context.pool, &context.files, video_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Resolves a link for the admin form preview. Nothing is stored.
#[utoipa::path(
    get,
    path = "/admin/videos/preview",
    tag = "Gallery",
    params(VideoPreviewParams),
    responses((status = 200, description = "Resolved video, all fields null when unrecognised", body = VideoRef)),
    security(("bearer_auth" = []))
)]
pub async fn preview_video_handler(Query(params): Query<VideoPreviewParams>) -> Json<VideoRef> {
    Json(service::preview_link(params.url.as_deref()))
}
