use crate::api_state::ApiContext;
use crate::video::handlers::{
    create_video_handler, delete_video_handler, list_videos_handler, preview_video_handler,
    public_videos_handler,
};
use axum::{
    Router,
    routing::{delete, get},
};

pub fn video_public_router() -> Router<ApiContext> {
    Router::new().route("/web/videos", get(public_videos_handler))
}

pub fn video_admin_router() -> Router<ApiContext> {
    Router::new()
        .route(
            "/admin/videos",
            get(list_videos_handler).post(create_video_handler),
        )
        .route("/admin/videos/preview", get(preview_video_handler))
        .route("/admin/videos/{video_id}", delete(delete_video_handler))
}
