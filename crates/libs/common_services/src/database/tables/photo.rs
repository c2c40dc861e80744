use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Corresponds to the `photo_category` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PhotoCategory {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A photo category with the number of photos in it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PhotoCategoryWithCount {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub photo_count: i64,
}

/// Corresponds to the `photo` table. `image` is the stored file path.
#[derive(Debug, Clone, FromRow)]
pub struct Photo {
    pub id: i32,
    pub category_id: i32,
    pub caption: Option<String>,
    pub description: Option<String>,
    pub image: String,
    pub show_on_home_page: bool,
    pub created_at: DateTime<Utc>,
}

/// A photo joined with the name of its category, for the admin list.
#[derive(Debug, Clone, FromRow)]
pub struct PhotoWithCategory {
    pub id: i32,
    pub category_id: i32,
    pub category_name: String,
    pub caption: Option<String>,
    pub description: Option<String>,
    pub image: String,
    pub show_on_home_page: bool,
    pub created_at: DateTime<Utc>,
}

impl From<PhotoWithCategory> for Photo {
    fn from(photo: PhotoWithCategory) -> Self {
        Self {
            id: photo.id,
            category_id: photo.category_id,
            caption: photo.caption,
            description: photo.description,
            image: photo.image,
            show_on_home_page: photo.show_on_home_page,
            created_at: photo.created_at,
        }
    }
}
