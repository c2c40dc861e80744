use crate::api::preview::MediaPreview;
use crate::storage::Upload;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

// --- Request Payloads ---

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePhotoCategoryRequest {
    pub name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HomePageFlagRequest {
    pub ids: Vec<i32>,
    pub show: bool,
}

/// A photo upload, parsed from the admin form.
#[derive(Debug, Default)]
pub struct NewPhoto {
    pub category_id: Option<i32>,
    pub caption: Option<String>,
    pub description: Option<String>,
    pub show_on_home_page: bool,
    pub image: Option<Upload>,
}

/// A video entry, parsed from the admin form.
#[derive(Debug, Default)]
pub struct NewVideo {
    pub caption: Option<String>,
    pub video_link: Option<String>,
    pub thumbnail: Option<Upload>,
}

// --- URL/Query Parameters ---

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub search: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct PhotoListParams {
    pub category_id: Option<i32>,
    pub show_on_home_page: Option<bool>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct VideoPreviewParams {
    pub url: Option<String>,
}

// --- Response Payloads ---

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PhotoResponse {
    pub id: i32,
    pub category_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    pub caption: Option<String>,
    pub description: Option<String>,
    pub image_url: String,
    pub show_on_home_page: bool,
    pub created_at: DateTime<Utc>,
}

/// A photo category with its photos, for the public gallery page.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GalleryCategory {
    pub id: i32,
    pub name: String,
    pub photos: Vec<PhotoResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedCount {
    pub updated: u64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoResponse {
    pub id: i32,
    pub caption: Option<String>,
    pub source_url: Option<String>,
    pub video_id: Option<String>,
    pub preview: MediaPreview,
    pub created_at: DateTime<Utc>,
}

/// A playable video for the public video page.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicVideo {
    pub id: i32,
    pub caption: Option<String>,
    pub embed_url: String,
    pub thumbnail_url: Option<String>,
}
