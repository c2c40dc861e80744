use chrono::{DateTime, Utc};
use common_types::MediaKind;
use sqlx::FromRow;

/// Corresponds to the `product_media` table: one slide of a product's media slider.
#[derive(Debug, Clone, FromRow)]
pub struct ProductMedia {
    pub id: i32,
    pub product_id: i32,
    pub kind: MediaKind,
    /// Uploaded image or video file.
    pub file: Option<String>,
    /// External image or video link.
    pub url: Option<String>,
    /// Stored thumbnail, overrides the thumbnail derived from `url`.
    pub thumbnail: Option<String>,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewProductMedia {
    pub product_id: i32,
    pub kind: MediaKind,
    pub file: Option<String>,
    pub url: Option<String>,
    pub thumbnail: Option<String>,
    pub display_order: i32,
}
