use crate::api::preview::MediaPreview;
use crate::storage::Upload;
use chrono::{DateTime, Utc};
use common_types::MediaKind;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// --- Request Payloads ---

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductCategoryRequest {
    pub name: String,
    pub description: Option<String>,
}

/// A product, parsed from the admin form.
#[derive(Debug, Default)]
pub struct NewProduct {
    pub category_id: Option<i32>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub catalogue: Option<Upload>,
    pub image: Option<Upload>,
}

/// Product fields to change. Absent fields keep their value.
#[derive(Debug, Default)]
pub struct ProductUpdate {
    pub category_id: Option<i32>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub catalogue: Option<Upload>,
    pub image: Option<Upload>,
}

/// A media slide, parsed from the admin form.
#[derive(Debug, Default)]
pub struct NewMedia {
    pub kind: MediaKind,
    pub file: Option<Upload>,
    pub url: Option<String>,
    pub thumbnail: Option<Upload>,
    pub display_order: Option<i32>,
}

// --- Response Payloads ---

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: i32,
    pub category_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub catalogue_url: Option<String>,
    pub image_url: Option<String>,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_count: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductMediaResponse {
    pub id: i32,
    pub product_id: i32,
    pub kind: MediaKind,
    pub file_url: Option<String>,
    pub url: Option<String>,
    pub display_order: i32,
    pub preview: MediaPreview,
    pub created_at: DateTime<Utc>,
}

/// A product page: the product, its slider and the other products of its category.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    pub product: ProductResponse,
    pub media: Vec<ProductMediaResponse>,
    pub related: Vec<ProductResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogueCategory {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub products: Vec<ProductResponse>,
}
